//! Telemetry link UART
//!
//! RP2040 has two UART peripherals; the link uses UART0 in buffered mode.
//! UART0 can be routed to GPIO 0/1, 12/13 or 16/17.

use embassy_rp::uart::{self, BufferedUartRx, BufferedUartTx};
use echolink_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use echolink_hal::{UartRx, UartTx};

/// Convert the link settings to the embassy-rp configuration
pub fn embassy_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    out
}

/// Whether `tx`/`rx` GPIOs form a valid UART0 pin pair
pub fn is_uart0_pair(tx: u8, rx: u8) -> bool {
    matches!((tx, rx), (0, 1) | (12, 13) | (16, 17))
}

/// Transmit half. Writes go into the ring buffer and only block when it is full.
pub struct LinkTx {
    tx: BufferedUartTx,
}

impl LinkTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for LinkTx {
    type Error = uart::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), uart::Error> {
        self.tx.blocking_write(&[byte]).map(|_| ())
    }
}

/// Receive half
pub struct LinkRx {
    rx: BufferedUartRx,
}

impl LinkRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }

    /// Wait for at least one byte and copy what is buffered into `buf`
    pub async fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, uart::Error> {
        embedded_io_async::Read::read(&mut self.rx, buf).await
    }
}

impl UartRx for LinkRx {
    type Error = uart::Error;

    fn read_byte(&mut self) -> Result<u8, uart::Error> {
        let mut byte = [0u8; 1];
        self.rx.blocking_read(&mut byte)?;
        Ok(byte[0])
    }
}
