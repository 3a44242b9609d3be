#[cfg(test)]
mod detection {
    use crate::detection::DEFAULT_CANDIDATES;
    use crate::prelude::*;
    use crate::tests::toolkit::{write_bytes, write_linear, write_sbet, Clock, SBET_FIELDS};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sbet() {
        let dir = tempdir().unwrap();
        // 17 x 101 records: no smaller candidate divides the file size
        let path = write_sbet(dir.path().join("sbet.out"), &Clock::new(0.0, 101, 1.0));
        let file = detect_fields(&path).unwrap();
        assert_eq!(file.fields(), SBET_FIELDS);
        assert_eq!(file.records(), 101);
    }

    #[test]
    fn within_candidates() {
        let dir = tempdir().unwrap();
        let path = write_linear(dir.path().join("linear.out"), 13, &Clock::new(0.0, 7, 1.0));

        assert_eq!(detect_fields_within(&path, 10..=20).unwrap().fields(), 13);

        match detect_fields_within(&path, 14..=20) {
            Err(Error::DetectionFailure { min, max, .. }) => {
                assert_eq!((min, max), (14, 20));
            },
            other => panic!("expecting detection failure, got {:?}", other),
        }
    }

    #[test]
    fn misaligned() {
        let dir = tempdir().unwrap();
        let path = write_sbet(dir.path().join("sbet.out"), &Clock::new(0.0, 101, 1.0));

        let mut bytes = fs::read(&path).unwrap();
        bytes.extend_from_slice(&[0, 0, 0]);
        let path = write_bytes(dir.path().join("misaligned.out"), &bytes);

        for fields in DEFAULT_CANDIDATES {
            assert!(
                matches!(
                    RecordFile::open(&path, fields),
                    Err(Error::Format(FormatError::Misaligned { .. }))
                ),
                "{} fields",
                fields
            );
        }

        assert!(matches!(
            detect_fields(&path),
            Err(Error::DetectionFailure { min: 5, max: 99, .. })
        ));
    }

    #[test]
    fn io_errors_abort() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            detect_fields(dir.path().join("missing.out")),
            Err(Error::Io(_))
        ));
    }
}
