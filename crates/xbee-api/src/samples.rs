//! IO sample decoding.
//!
//! Several responses carry packed digital/analog readings in the XBee IO
//! data format:
//!
//! ```text
//! +-------+----------+----------+----------------------------------------+
//! | count | dio_mask | aio_mask | count × (dio_bits? + adc_0..adc_n)     |
//! | 1     | 2 (BE)   | 1        | 2 bytes each, big-endian               |
//! +-------+----------+----------+----------------------------------------+
//! ```
//!
//! The digital word is present only when at least one DIO channel is enabled.
//! Only mask bits 0-8 (DIO) and 0-6 (AIO) select channels.

use std::collections::BTreeMap;

use bytes::Buf;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::constants::*;
use crate::error::{ApiError, Result};

/// Label prefix of digital readings.
pub const DIO_PREFIX: &str = "dio-";
/// Label prefix of analog readings.
pub const ADC_PREFIX: &str = "adc-";

/// The parsed 4-byte header of an IO sample payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoSampleHeader {
    /// Number of sample blocks that follow.
    pub sample_count: u8,
    /// Digital channel enable mask (also applied to the digital word).
    pub dio_mask: u16,
    /// Analog channel enable mask.
    pub aio_mask: u8,
    /// Enabled digital channels, ascending.
    pub dio_channels: Vec<u8>,
    /// Enabled analog channels, ascending.
    pub aio_channels: Vec<u8>,
}

impl IoSampleHeader {
    /// Parse the header from the start of `io_bytes`.
    pub fn parse(io_bytes: &[u8]) -> Result<Self> {
        if io_bytes.len() < IO_SAMPLE_HEADER_SIZE {
            return Err(ApiError::truncated(
                "io sample header",
                IO_SAMPLE_HEADER_SIZE,
                io_bytes.len(),
            ));
        }

        let mut header = &io_bytes[..IO_SAMPLE_HEADER_SIZE];
        let sample_count = header.get_u8();
        let dio_mask = header.get_u16();
        let aio_mask = header.get_u8();

        let dio_channels = (0..DIO_CHANNEL_COUNT)
            .filter(|&ch| dio_mask & (1u16 << ch) != 0)
            .collect();
        let aio_channels = (0..AIO_CHANNEL_COUNT)
            .filter(|&ch| aio_mask & (1u8 << ch) != 0)
            .collect();

        Ok(IoSampleHeader {
            sample_count,
            dio_mask,
            aio_mask,
            dio_channels,
            aio_channels,
        })
    }

    /// Bytes occupied by one sample block.
    pub fn sample_size(&self) -> usize {
        let digital = if self.dio_channels.is_empty() { 0 } else { 1 };
        (digital + self.aio_channels.len()) * IO_READING_SIZE
    }

    /// Bytes required after the header for all sample blocks.
    pub fn body_len(&self) -> usize {
        self.sample_count as usize * self.sample_size()
    }
}

/// A single reading within a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reading {
    /// Digital pin level.
    Digital(bool),
    /// Raw ADC value.
    Analog(u16),
}

/// One decoded sample block.
///
/// Readings are keyed by channel number; [`Sample::get`] and the serialized
/// form use the `dio-<n>` / `adc-<n>` labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    /// Digital readings by DIO channel.
    pub digital: BTreeMap<u8, bool>,
    /// Analog readings by AIO channel.
    pub analog: BTreeMap<u8, u16>,
}

impl Sample {
    /// Level of a digital channel, if it was sampled.
    pub fn dio(&self, channel: u8) -> Option<bool> {
        self.digital.get(&channel).copied()
    }

    /// Value of an analog channel, if it was sampled.
    pub fn adc(&self, channel: u8) -> Option<u16> {
        self.analog.get(&channel).copied()
    }

    /// Look up a reading by label (`"dio-3"`, `"adc-0"`).
    pub fn get(&self, label: &str) -> Option<Reading> {
        if let Some(channel) = label.strip_prefix(DIO_PREFIX) {
            let channel = channel.parse().ok()?;
            self.dio(channel).map(Reading::Digital)
        } else if let Some(channel) = label.strip_prefix(ADC_PREFIX) {
            let channel = channel.parse().ok()?;
            self.adc(channel).map(Reading::Analog)
        } else {
            None
        }
    }

    /// All readings as `(label, reading)`, digital channels first.
    pub fn readings(&self) -> impl Iterator<Item = (String, Reading)> + '_ {
        let digital = self
            .digital
            .iter()
            .map(|(ch, level)| (format!("{}{}", DIO_PREFIX, ch), Reading::Digital(*level)));
        let analog = self
            .analog
            .iter()
            .map(|(ch, value)| (format!("{}{}", ADC_PREFIX, ch), Reading::Analog(*value)));
        digital.chain(analog)
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.digital.len() + self.analog.len()
    }

    /// Whether no channel was sampled.
    pub fn is_empty(&self) -> bool {
        self.digital.is_empty() && self.analog.is_empty()
    }
}

impl Serialize for Sample {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (label, reading) in self.readings() {
            map.serialize_entry(&label, &reading)?;
        }
        map.end()
    }
}

/// Decode an IO sample payload into one [`Sample`] per block.
///
/// The whole layout is length-checked before any block is read. Bytes past
/// the last block are ignored.
pub fn decode_samples(io_bytes: &[u8]) -> Result<Vec<Sample>> {
    let header = IoSampleHeader::parse(io_bytes)?;
    let mut body = &io_bytes[IO_SAMPLE_HEADER_SIZE..];

    let needed = header.body_len();
    if body.len() < needed {
        return Err(ApiError::truncated("io sample data", needed, body.len()));
    }

    let mut samples = Vec::with_capacity(header.sample_count as usize);
    for _ in 0..header.sample_count {
        let mut sample = Sample::default();

        if !header.dio_channels.is_empty() {
            let levels = body.get_u16() & header.dio_mask;
            for &ch in &header.dio_channels {
                sample.digital.insert(ch, (levels >> ch) & 1 == 1);
            }
        }

        for &ch in &header.aio_channels {
            sample.analog.insert(ch, body.get_u16());
        }

        samples.push(sample);
    }

    if body.has_remaining() {
        log::trace!("ignoring {} bytes after IO samples", body.remaining());
    }

    Ok(samples)
}
