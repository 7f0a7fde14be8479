//! Analog input abstraction

/// A single ADC channel
pub trait AnalogInput {
    /// Error type for conversions
    type Error;

    /// Take one conversion
    fn read_raw(&mut self) -> Result<u16, Self::Error>;

    /// Largest value [`read_raw`](Self::read_raw) can return (e.g. 4095 for 12-bit)
    fn full_scale(&self) -> u16;

    /// Reference voltage in millivolts
    fn vref_mv(&self) -> u16 {
        3300
    }

    /// Take one conversion and scale it to millivolts
    fn read_mv(&mut self) -> Result<u16, Self::Error> {
        let raw = self.read_raw()? as u32;
        let full = self.full_scale().max(1) as u32;
        Ok((raw * self.vref_mv() as u32 / full) as u16)
    }
}
