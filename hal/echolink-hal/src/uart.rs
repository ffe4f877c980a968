//! UART serial communication abstractions
//!
//! The telemetry link moves exactly one byte per TX-ready / RX-ready event,
//! so the traits are byte-granular rather than buffer-granular.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write a single byte, blocking until the holding register accepts it
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write a run of bytes one at a time
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read a single byte, blocking until one arrives
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    /// 9600 8N1, the speed both nodes are wired for
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingTx {
        sent: [u8; 8],
        len: usize,
    }

    impl UartTx for RecordingTx {
        type Error = ();

        fn write_byte(&mut self, byte: u8) -> Result<(), ()> {
            if self.len >= self.sent.len() {
                return Err(());
            }
            self.sent[self.len] = byte;
            self.len += 1;
            Ok(())
        }
    }

    #[test]
    fn test_write_all_is_bytewise() {
        let mut tx = RecordingTx { sent: [0; 8], len: 0 };
        tx.write_all(b"742").unwrap();
        assert_eq!(&tx.sent[..tx.len], b"742");
    }

    #[test]
    fn test_write_all_propagates_error() {
        let mut tx = RecordingTx { sent: [0; 8], len: 0 };
        assert!(tx.write_all(&[0u8; 9]).is_err());
    }

    #[test]
    fn test_default_config() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.parity, Parity::None);
    }
}
