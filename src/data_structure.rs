/// One simulated snapshot of the environment sensors.
///
/// Built fresh for every logged row and dropped right after serialization;
/// the loop-count label is attached at logging time, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: String,
    pub temperature: f64,
    pub humidity: f64,
    pub co2: f64,
}
