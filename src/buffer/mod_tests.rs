//! Tests for the packet buffer.

use uuid::Uuid;

use super::{BufferError, PacketBuffer, ReadBuffer, WriteBuffer};

mod primitives {
    use super::*;

    #[test]
    fn fixed_width_values_read_back_in_order() {
        let mut buffer = PacketBuffer::new();
        buffer.write_bool(true);
        buffer.write_byte(0xAB);
        buffer.write_short(-2);
        buffer.write_int(123_456);
        buffer.write_long(-9_876_543_210);
        buffer.write_float(1.5);
        buffer.write_double(-0.25);
        buffer.write_char('λ');

        assert!(buffer.read_bool().unwrap());
        assert_eq!(buffer.read_byte().unwrap(), 0xAB);
        assert_eq!(buffer.read_short().unwrap(), -2);
        assert_eq!(buffer.read_int().unwrap(), 123_456);
        assert_eq!(buffer.read_long().unwrap(), -9_876_543_210);
        assert!((buffer.read_float().unwrap() - 1.5).abs() < f32::EPSILON);
        assert!((buffer.read_double().unwrap() + 0.25).abs() < f64::EPSILON);
        assert_eq!(buffer.read_char().unwrap(), 'λ');
        assert!(buffer.is_empty());
    }

    #[test]
    fn medium_is_three_bytes_and_sign_extended() {
        let mut buffer = PacketBuffer::new();
        buffer.write_medium(-5);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.read_medium().unwrap(), -5);

        buffer.write_medium(0x12_3456);
        assert_eq!(buffer.read_medium().unwrap(), 0x12_3456);
    }

    #[test]
    fn uuid_is_sixteen_bytes() {
        let id = Uuid::from_u128(0x0123_4567_89ab_cdef_fedc_ba98_7654_3210);
        let mut buffer = PacketBuffer::new();
        buffer.write_uuid(id);

        assert_eq!(buffer.len(), 16);
        assert_eq!(buffer.read_uuid().unwrap(), id);
    }
}

mod var_int {
    use super::*;

    #[test]
    fn small_values_use_one_byte() {
        let mut buffer = PacketBuffer::new();
        buffer.write_var_int(127);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn larger_values_grow() {
        let mut buffer = PacketBuffer::new();
        buffer.write_var_int(300);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.read_var_int().unwrap(), 300);
    }

    #[test]
    fn negative_values_use_five_bytes() {
        let mut buffer = PacketBuffer::new();
        buffer.write_var_int(-1);
        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.read_var_int().unwrap(), -1);
    }

    #[test]
    fn overlong_encoding_is_rejected() {
        let mut buffer = PacketBuffer::from_bytes(&[0xFF; 6]);
        assert_eq!(buffer.read_var_int(), Err(BufferError::VarIntTooLong));
    }
}

mod strings {
    use super::*;

    #[test]
    fn strings_are_length_prefixed() {
        let mut buffer = PacketBuffer::new();
        buffer.write_string("héllo");
        assert_eq!(buffer.len(), 1 + "héllo".len());
        assert_eq!(buffer.read_string().unwrap(), "héllo");
    }

    #[test]
    fn enum_by_name_resolves_index() {
        let mut buffer = PacketBuffer::new();
        buffer.write_enum("GREEN");
        assert_eq!(buffer.read_enum(&["RED", "GREEN"]).unwrap(), 1);
    }

    #[test]
    fn unknown_enum_name_is_an_error() {
        let mut buffer = PacketBuffer::new();
        buffer.write_enum("BLUE");
        assert!(matches!(
            buffer.read_enum(&["RED"]),
            Err(BufferError::UnknownVariant { name }) if name == "BLUE"
        ));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut buffer = PacketBuffer::from_bytes(&[2, 0xC3, 0x28]);
        assert!(matches!(
            buffer.read_string(),
            Err(BufferError::InvalidUtf8(_))
        ));
    }
}

mod underflow {
    use super::*;

    #[test]
    fn reading_past_the_end_reports_sizes() {
        let mut buffer = PacketBuffer::from_bytes(&[1, 2]);
        assert_eq!(
            buffer.read_int(),
            Err(BufferError::Underflow {
                needed: 4,
                remaining: 2
            })
        );
    }

    #[test]
    fn truncated_string_is_an_error() {
        let mut buffer = PacketBuffer::from_bytes(&[5, b'a']);
        assert!(matches!(
            buffer.read_string(),
            Err(BufferError::Underflow { needed: 5, .. })
        ));
    }
}
