//! STM32F103 internal temperature sensor conversion.
//!
//! Constants from the STM32F103x8 datasheet, table "Temperature sensor
//! characteristics" and "Embedded internal reference voltage".

/// Full-scale code of the 12-bit ADC.
pub const ADC_MAX: f32 = 4095.0;
/// Internal reference voltage (V).
pub const VREFINT: f32 = 1.20;
/// Sensor voltage at 25 °C (V).
pub const V25: f32 = 1.43;
/// Average slope (V/°C).
pub const AVG_SLOPE: f32 = 0.0043;
/// Supply assumed when no reference reading is available (V).
pub const NOMINAL_VDDA: f32 = 3.3;

/// Supply voltage derived from the internal reference reading.
pub fn vdda(vref_raw: u16) -> f32 {
    if vref_raw == 0 {
        return NOMINAL_VDDA;
    }
    VREFINT * ADC_MAX / vref_raw as f32
}

/// Convert raw ADC readings of the temperature and reference channels to °C.
pub fn internal_temperature_celsius(temp_raw: u16, vref_raw: u16) -> f32 {
    let vsense = temp_raw as f32 * vdda(vref_raw) / ADC_MAX;
    (V25 - vsense) / AVG_SLOPE + 25.0
}
