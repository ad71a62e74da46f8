use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::i2c::{Error, ErrorKind, NoAcknowledgeSource, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DummyError {
    InvalidTest,
    Nack,
}

impl Error for DummyError {
    fn kind(&self) -> ErrorKind {
        match &self {
            DummyError::InvalidTest => ErrorKind::Other,
            DummyError::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
        }
    }
}

/// Scripted bus. Reads are served from a queue of canned responses; every
/// write is recorded together with its target address.
#[derive(Debug, Default)]
pub struct DummyBus {
    responses: VecDeque<Vec<u8>>,
    /// Number of writes acknowledged before the bus starts NACKing.
    ack_limit: Option<usize>,
    pub writes: Vec<(u8, Vec<u8>)>,
    pub reads: Vec<(u8, usize)>,
}

impl DummyBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: &[u8]) -> Self {
        self.responses.push_back(response.to_vec());
        self
    }

    pub fn nack_writes(self) -> Self {
        self.nack_writes_after(0)
    }

    pub fn nack_writes_after(mut self, acked: usize) -> Self {
        self.ack_limit = Some(acked);
        self
    }

    pub fn commands(&self) -> Vec<[u8; 2]> {
        self.writes
            .iter()
            .map(|(_, bytes)| [bytes[0], bytes[1]])
            .collect()
    }
}

impl embedded_hal::i2c::ErrorType for DummyBus {
    type Error = DummyError;
}

impl embedded_hal::i2c::I2c for DummyBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation],
    ) -> Result<(), Self::Error> {
        match operations {
            [Operation::Write(bytes)] => {
                if self
                    .ack_limit
                    .is_some_and(|limit| self.writes.len() >= limit)
                {
                    return Err(DummyError::Nack);
                }
                self.writes.push((address, bytes.to_vec()));
                Ok(())
            }
            [Operation::Read(response)] => {
                self.reads.push((address, response.len()));
                // An empty queue behaves like a device without data: it NACKs.
                let Some(canned) = self.responses.pop_front() else {
                    return Err(DummyError::Nack);
                };
                if response.len() != canned.len() {
                    return Err(DummyError::InvalidTest);
                }

                response.copy_from_slice(&canned);

                Ok(())
            }
            // Other transactions are invalid
            _ => Err(DummyError::InvalidTest),
        }
    }
}

impl embedded_hal_async::i2c::I2c for DummyBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::transaction(self, address, operations)
    }
}
