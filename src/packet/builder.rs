use std::mem::take;

/// Appends fixed-width fields to a growing packet region.
pub struct Builder {
    data: Vec<u8>,
}

impl Builder {
    pub fn with_capacity(expected_len: usize) -> Self {
        Builder {
            data: Vec::with_capacity(expected_len),
        }
    }

    /// Appends a single byte.
    pub fn u8(&mut self, data: u8) -> &mut Self {
        self.data.push(data);
        self
    }

    /// Appends a number in little-endian byte order.
    pub fn u16(&mut self, data: u16) -> &mut Self {
        self.buf(&data.to_le_bytes())
    }

    /// Appends a tag byte immediately followed by its value.
    pub fn tagged(&mut self, tag: u8, value: u8) -> &mut Self {
        self.u8(tag).u8(value)
    }

    pub fn buf(&mut self, data: &[u8]) -> &mut Self {
        self.data.extend(data);
        self
    }

    /// Finishes the build, consuming the contents and leaving a fresh builder in place.
    pub fn finish(&mut self) -> Vec<u8> {
        take(&mut self.data)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fields_in_order() {
        let data = Builder::with_capacity(7)
            .u8(0x16)
            .u16(0x0201)
            .tagged(0x0D, 0x02)
            .buf(&[0xAA, 0xBB])
            .finish();
        assert_eq!(data, vec![0x16, 0x01, 0x02, 0x0D, 0x02, 0xAA, 0xBB]);
    }

    #[test]
    fn finish_leaves_empty_builder() {
        let mut builder = Builder::with_capacity(1);
        builder.u8(1);
        assert_eq!(builder.finish(), vec![1]);
        assert!(
            builder.finish().is_empty(),
            "Expected builder to be empty after finishing"
        );
    }
}
