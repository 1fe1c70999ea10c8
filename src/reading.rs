use rand::Rng;

/// Nominal mains voltage tolerance band, volts.
pub const VOLTAGE_MIN: f64 = 228.0;
pub const VOLTAGE_MAX: f64 = 232.0;

/// Normal draw of the simulated small appliance, amps.
pub const CURRENT_MIN: f64 = 0.4;
pub const CURRENT_MAX: f64 = 0.6;

/// One synthetic sensor reading. Power is derived from the other two
/// fields, never sampled on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
}

impl SensorReading {
    /// Build a reading from raw voltage/current samples, applying the
    /// precision the sensor reports at and deriving power.
    pub fn from_samples(voltage: f64, current: f64) -> Self {
        let voltage = round_to(voltage, 2);
        let current = round_to(current, 3);
        let power = round_to(voltage * current, 2);
        Self {
            voltage,
            current,
            power,
        }
    }
}

/// Draw one synthetic reading from the supplied random source: mains
/// voltage around nominal, a small appliance's current draw.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> SensorReading {
    let voltage = rng.gen_range(VOLTAGE_MIN..=VOLTAGE_MAX);
    let current = rng.gen_range(CURRENT_MIN..=CURRENT_MAX);
    SensorReading::from_samples(voltage, current)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
