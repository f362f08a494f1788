mod common;

#[cfg(test)]
mod tests {
    use codec_core::{Codec, CodecConfig};

    use crate::common::{noise, text, ShortReader, TrackingWriter};

    const CHUNK: usize = 8 * 1024;

    fn codec() -> Codec {
        Codec::new(CodecConfig::new().with_chunk_size(CHUNK)).unwrap()
    }

    #[test]
    fn multi_megabyte_stream_uses_bounded_buffers() {
        let codec = codec();
        let mut data = text(3 << 20);
        data.extend(noise(1 << 20, 42));

        let mut reader = ShortReader::new(&data, 1000);
        let mut packed = TrackingWriter::default();
        let stats = codec.compress(&mut reader, &mut packed).unwrap();

        assert_eq!(stats.bytes_in as usize, data.len());
        assert_eq!(stats.bytes_out as usize, packed.data.len());
        assert!(reader.largest_buf <= CHUNK);
        assert!(packed.largest_write <= CHUNK);

        let mut reader = ShortReader::new(&packed.data, 333);
        let mut plain = TrackingWriter::default();
        let stats = codec.decompress(&mut reader, &mut plain).unwrap();

        assert_eq!(stats.bytes_out as usize, data.len());
        assert!(reader.largest_buf <= CHUNK);
        assert!(plain.largest_write <= CHUNK);
        assert!(plain.data == data);
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let codec = codec();
        let data = noise(100_000, 5);

        let mut reader = ShortReader::new(&data, 4096).interrupting(3);
        let mut packed = Vec::new();
        codec.compress(&mut reader, &mut packed).unwrap();

        let mut reader = ShortReader::new(&packed, 512).interrupting(2);
        let mut plain = Vec::new();
        codec.decompress(&mut reader, &mut plain).unwrap();
        assert_eq!(plain, data);
    }

    #[test]
    fn one_byte_reads_roundtrip() {
        let codec = Codec::new(CodecConfig::new().with_chunk_size(1)).unwrap();
        let data = text(3_000);

        let mut packed = Vec::new();
        codec.compress(&mut ShortReader::new(&data, 1), &mut packed).unwrap();
        let mut plain = Vec::new();
        codec.decompress(&mut ShortReader::new(&packed, 1), &mut plain).unwrap();
        assert_eq!(plain, data);
    }

    #[test]
    fn works_through_trait_objects() {
        let codec = codec();
        let data = text(10_000);

        let mut source: Box<dyn std::io::Read + Send> = Box::new(std::io::Cursor::new(data.clone()));
        let mut sink: Box<dyn std::io::Write + Send> = Box::new(Vec::new());
        codec.compress(&mut *source, &mut *sink).unwrap();

        let mut packed = Vec::new();
        codec.compress(&mut std::io::Cursor::new(&data), &mut packed).unwrap();
        assert_eq!(codec.decompress_bytes(&packed).unwrap(), data);
    }
}
