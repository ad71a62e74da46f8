use embedded_hal::i2c::I2c;
use embedded_hal_async::i2c::I2c as AsyncI2c;
use thiserror::Error;

pub type Cmd = [u8; 2];

/// Longest response the driver ever asks for: product id plus serial number,
/// six words of two data bytes and one CRC byte each.
pub const MAX_WORDS: usize = 6;
const BUFFER_LEN: usize = MAX_WORDS * 3;

#[derive(Clone, Copy, Hash, Debug, PartialEq, Eq, PartialOrd, Ord, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<I2cError> {
    /// The command was not fully acknowledged by the bus.
    #[error("command write incomplete")]
    Write(I2cError),
    /// The device did not deliver the requested number of bytes. This is also
    /// what a read right after a non-stretching trigger looks like.
    #[error("response read incomplete")]
    Read(I2cError),
    #[error("invalid CRC")]
    InvalidCrc,
    #[error("invalid response")]
    InvalidResponse,
    #[error("unknown product id {0:#010x}")]
    UnknownProductId(u32),
    #[error("sensor not initialized")]
    NotInitialized,
    /// The command is not accepted in the current state, e.g. a trigger
    /// while continuous measurement is running.
    #[error("operation not allowed in current state")]
    InvalidState,
}

impl<E> embedded_hal::i2c::Error for Error<E>
where
    E: embedded_hal::i2c::Error,
{
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        match self {
            Self::Write(err) | Self::Read(err) => err.kind(),
            _ => embedded_hal::i2c::ErrorKind::Other,
        }
    }
}

/// CRC-8 lookup table. Polynomial 0x31, init 0xff, no reflection, no final XOR.
/// Shared by every sensor instance.
#[rustfmt::skip]
static CRC_LUT: [u8; 256] = [
    0x00, 0x31, 0x62, 0x53, 0xC4, 0xF5, 0xA6, 0x97, 0xB9, 0x88, 0xDB, 0xEA, 0x7D, 0x4C, 0x1F, 0x2E,
    0x43, 0x72, 0x21, 0x10, 0x87, 0xB6, 0xE5, 0xD4, 0xFA, 0xCB, 0x98, 0xA9, 0x3E, 0x0F, 0x5C, 0x6D,
    0x86, 0xB7, 0xE4, 0xD5, 0x42, 0x73, 0x20, 0x11, 0x3F, 0x0E, 0x5D, 0x6C, 0xFB, 0xCA, 0x99, 0xA8,
    0xC5, 0xF4, 0xA7, 0x96, 0x01, 0x30, 0x63, 0x52, 0x7C, 0x4D, 0x1E, 0x2F, 0xB8, 0x89, 0xDA, 0xEB,
    0x3D, 0x0C, 0x5F, 0x6E, 0xF9, 0xC8, 0x9B, 0xAA, 0x84, 0xB5, 0xE6, 0xD7, 0x40, 0x71, 0x22, 0x13,
    0x7E, 0x4F, 0x1C, 0x2D, 0xBA, 0x8B, 0xD8, 0xE9, 0xC7, 0xF6, 0xA5, 0x94, 0x03, 0x32, 0x61, 0x50,
    0xBB, 0x8A, 0xD9, 0xE8, 0x7F, 0x4E, 0x1D, 0x2C, 0x02, 0x33, 0x60, 0x51, 0xC6, 0xF7, 0xA4, 0x95,
    0xF8, 0xC9, 0x9A, 0xAB, 0x3C, 0x0D, 0x5E, 0x6F, 0x41, 0x70, 0x23, 0x12, 0x85, 0xB4, 0xE7, 0xD6,
    0x7A, 0x4B, 0x18, 0x29, 0xBE, 0x8F, 0xDC, 0xED, 0xC3, 0xF2, 0xA1, 0x90, 0x07, 0x36, 0x65, 0x54,
    0x39, 0x08, 0x5B, 0x6A, 0xFD, 0xCC, 0x9F, 0xAE, 0x80, 0xB1, 0xE2, 0xD3, 0x44, 0x75, 0x26, 0x17,
    0xFC, 0xCD, 0x9E, 0xAF, 0x38, 0x09, 0x5A, 0x6B, 0x45, 0x74, 0x27, 0x16, 0x81, 0xB0, 0xE3, 0xD2,
    0xBF, 0x8E, 0xDD, 0xEC, 0x7B, 0x4A, 0x19, 0x28, 0x06, 0x37, 0x64, 0x55, 0xC2, 0xF3, 0xA0, 0x91,
    0x47, 0x76, 0x25, 0x14, 0x83, 0xB2, 0xE1, 0xD0, 0xFE, 0xCF, 0x9C, 0xAD, 0x3A, 0x0B, 0x58, 0x69,
    0x04, 0x35, 0x66, 0x57, 0xC0, 0xF1, 0xA2, 0x93, 0xBD, 0x8C, 0xDF, 0xEE, 0x79, 0x48, 0x1B, 0x2A,
    0xC1, 0xF0, 0xA3, 0x92, 0x05, 0x34, 0x67, 0x56, 0x78, 0x49, 0x1A, 0x2B, 0xBC, 0x8D, 0xDE, 0xEF,
    0x82, 0xB3, 0xE0, 0xD1, 0x46, 0x77, 0x24, 0x15, 0x3B, 0x0A, 0x59, 0x68, 0xFF, 0xCE, 0x9D, 0xAC,
];

const CRC_INIT: u8 = 0xff;

/// Checksum the sensor appends to every data word.
pub fn crc(word: &[u8; 2]) -> u8 {
    let mut crc = CRC_INIT;
    for byte in word {
        crc = CRC_LUT[(crc ^ byte) as usize];
    }
    crc
}

/// True iff `checksum` is the CRC of `word`.
pub fn verify(word: &[u8; 2], checksum: u8) -> bool {
    crc(word) == checksum
}

fn check_crc<E>(data: &[u8; 3]) -> Result<(), Error<E>> {
    let computed = crc(&[data[0], data[1]]);
    if computed != data[2] {
        warn!(
            "crc mismatch: computed {=u8:#x}, received {=u8:#x}",
            computed,
            data[2]
        );
        Err(Error::InvalidCrc)
    } else {
        Ok(())
    }
}

/// Validates `words.len()` received triplets from `raw` and stores the data
/// words. Nothing is written to `words` unless every CRC matches.
fn parse_words<E>(raw: &[u8], words: &mut [u16]) -> Result<(), Error<E>> {
    let chunks = raw.as_chunks::<3>().0;
    for piece in chunks {
        check_crc(piece)?;
    }
    for (word, piece) in words.iter_mut().zip(chunks) {
        *word = u16::from_be_bytes([piece[0], piece[1]]);
    }
    Ok(())
}

/// Command/response plumbing shared by every Sensirion part on the bus. Owns
/// the bus handle and a receive buffer reused between transfers.
#[derive(Debug)]
pub struct Sensor<I2C> {
    i2c: I2C,
    addr: u8,
    buffer: [u8; BUFFER_LEN],
}

impl<I2C> Sensor<I2C> {
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            buffer: [0; BUFFER_LEN],
        }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn response_len(words: &[u16]) -> usize {
        debug_assert!(words.len() <= MAX_WORDS);
        words.len().min(MAX_WORDS) * 3
    }
}

impl<I2C: I2c> Sensor<I2C> {
    pub fn send_command(&mut self, cmd: &Cmd) -> Result<(), Error<I2C::Error>> {
        self.send_command_to(self.addr, cmd)
    }

    /// Sends `cmd` to an arbitrary bus address, e.g. the general call address.
    pub fn send_command_to(&mut self, addr: u8, cmd: &Cmd) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(addr, cmd).map_err(Error::Write)
    }

    /// Reads `words.len()` CRC-protected words. The transfer may be held by
    /// clock stretching until the device has data.
    pub fn read_words(&mut self, words: &mut [u16]) -> Result<(), Error<I2C::Error>> {
        let len = Self::response_len(words);
        self.i2c
            .read(self.addr, &mut self.buffer[..len])
            .map_err(Error::Read)?;
        parse_words(&self.buffer[..len], words)
    }
}

impl<I2C: AsyncI2c> Sensor<I2C> {
    pub async fn send_command_async(&mut self, cmd: &Cmd) -> Result<(), Error<I2C::Error>> {
        self.send_command_to_async(self.addr, cmd).await
    }

    pub async fn send_command_to_async(
        &mut self,
        addr: u8,
        cmd: &Cmd,
    ) -> Result<(), Error<I2C::Error>> {
        AsyncI2c::write(&mut self.i2c, addr, cmd)
            .await
            .map_err(Error::Write)
    }

    pub async fn read_words_async(&mut self, words: &mut [u16]) -> Result<(), Error<I2C::Error>> {
        let len = Self::response_len(words);
        AsyncI2c::read(&mut self.i2c, self.addr, &mut self.buffer[..len])
            .await
            .map_err(Error::Read)?;
        parse_words(&self.buffer[..len], words)
    }
}
