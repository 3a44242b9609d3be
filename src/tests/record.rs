#[cfg(test)]
mod record {
    use crate::prelude::*;
    use crate::tests::toolkit::{linear_record, write_bytes, write_linear, write_sbet, Clock};
    use std::thread;
    use tempfile::tempdir;

    #[test]
    fn open() {
        let dir = tempdir().unwrap();
        let path = write_linear(dir.path().join("linear.out"), 7, &Clock::new(100.0, 401, 1.0));

        let file = RecordFile::open(&path, 7).unwrap();
        assert_eq!(file.path(), path.as_path());
        assert_eq!(file.fields(), 7);
        assert_eq!(file.record_width(), 56);
        assert_eq!(file.size(), 401 * 56);
        assert_eq!(file.records(), 401);
        assert_eq!(file.start_time(), 100.0);
        assert_eq!(file.end_time(), 500.0);
        assert_eq!(file.time_inc(), 1.0);
        assert_eq!(file.time_span(), 400.0);

        let summary = file.to_string();
        assert!(summary.contains("Records: 401"), "{}", summary);
        assert!(summary.contains("Start time: 100.000 s"), "{}", summary);
    }

    #[test]
    fn boundaries() {
        let dir = tempdir().unwrap();
        let clock = Clock::new(1000.0, 2001, 0.5).with_drift(1.0E-3);
        let path = write_linear(dir.path().join("drift.out"), 5, &clock);
        let timestamps = clock.timestamps();

        let file = RecordFile::open(&path, 5).unwrap();
        let (first, last) = (file.field(1, 1).unwrap(), file.field(2001, 1).unwrap());

        assert_eq!(first, timestamps[0]);
        assert_eq!(last, timestamps[2000]);
        assert!((file.start_time() - first).abs() <= 5.0E-4);
        assert!((file.end_time() - last).abs() <= 5.0E-4);
        assert!((file.time_inc() - (last - first) / 2000.0).abs() < 1.0E-12);
    }

    #[test]
    fn interpolation_at_boundaries() {
        let dir = tempdir().unwrap();
        let path = write_sbet(dir.path().join("sbet.out"), &Clock::new(250.0, 1201, 0.5));
        let file = RecordFile::open(&path, 17).unwrap();

        for field in 1..=17 {
            assert_eq!(
                file.interpolate(file.start_time(), field).unwrap(),
                file.field(1, field).unwrap(),
                "field #{} at start time",
                field
            );
            assert_eq!(
                file.interpolate(file.end_time(), field).unwrap(),
                file.field(1201, field).unwrap(),
                "field #{} at end time",
                field
            );
        }
    }

    #[test]
    fn interpolation_at_rounded_boundaries() {
        let dir = tempdir().unwrap();
        let clock = Clock::new(1000.0, 2001, 0.1).with_jitter(1.0E-4, 3);
        let path = write_linear(dir.path().join("jitter.out"), 5, &clock);
        let file = RecordFile::open(&path, 5).unwrap();

        let start = file.interpolate(file.start_time(), 3).unwrap();
        let end = file.interpolate(file.end_time(), 3).unwrap();

        assert!((start - file.field(1, 3).unwrap()).abs() < 1.0E-2);
        assert!((end - file.field(2001, 3).unwrap()).abs() < 1.0E-2);
    }

    #[test]
    fn nearest_record_with_drift() {
        let dir = tempdir().unwrap();
        let clock = Clock::new(1000.0, 10001, 0.1)
            .with_drift(2.0E-3)
            .with_jitter(1.0E-4, 7);
        let path = write_linear(dir.path().join("drift.out"), 5, &clock);
        let file = RecordFile::open(&path, 5).unwrap();

        // local period may exceed the average increment
        let tolerance = file.time_inc() * 0.55;

        let mut t = file.start_time();
        while t <= file.end_time() {
            let record = file.nearest_record(t).unwrap();
            let time = file.field(record, 1).unwrap();
            assert!(
                (time - t).abs() <= tolerance,
                "t={} nearest record #{} is at {}",
                t,
                record,
                time
            );
            t += 0.37;
        }
    }

    #[test]
    fn interpolation_with_drift() {
        let dir = tempdir().unwrap();
        let clock = Clock::new(250.0, 10001, 0.1).with_drift(2.0E-3);
        let path = write_linear(dir.path().join("drift.out"), 4, &clock);
        let file = RecordFile::open(&path, 4).unwrap();

        let mut t = file.start_time();
        while t <= file.end_time() {
            for field in 2..=4 {
                let expected = field as f64 * t + field as f64;
                let value = file.interpolate(t, field).unwrap();
                assert!(
                    (value - expected).abs() < 1.0E-6,
                    "field #{} at t={}: {} != {}",
                    field,
                    t,
                    value,
                    expected
                );
            }
            t += 0.73;
        }
    }

    #[test]
    fn out_of_range() {
        let dir = tempdir().unwrap();
        let path = write_linear(dir.path().join("linear.out"), 7, &Clock::new(100.0, 401, 1.0));
        let file = RecordFile::open(&path, 7).unwrap();

        assert!(matches!(
            file.field(0, 1),
            Err(Error::Range(RangeError::Record { index: 0, count: 401 }))
        ));
        assert!(matches!(
            file.field(402, 1),
            Err(Error::Range(RangeError::Record { index: 402, count: 401 }))
        ));
        assert!(matches!(
            file.field(1, 0),
            Err(Error::Range(RangeError::Field { index: 0, count: 7 }))
        ));
        assert!(matches!(
            file.field(1, 8),
            Err(Error::Range(RangeError::Field { index: 8, count: 7 }))
        ));
        assert!(matches!(
            file.nearest_record(99.9),
            Err(Error::Range(RangeError::Time { .. }))
        ));
        assert!(matches!(
            file.nearest_record(500.1),
            Err(Error::Range(RangeError::Time { .. }))
        ));
        assert!(matches!(
            file.interpolate(600.0, 2),
            Err(Error::Range(RangeError::Time { .. }))
        ));
        assert!(matches!(
            file.block(&[1, 2], &[1, 9]),
            Err(Error::Range(RangeError::Field { index: 9, count: 7 }))
        ));
    }

    #[test]
    fn malformed() {
        let dir = tempdir().unwrap();

        let path = write_linear(dir.path().join("linear.out"), 7, &Clock::new(0.0, 10, 1.0));
        assert!(matches!(
            RecordFile::open(&path, 0),
            Err(Error::Format(FormatError::NoFields))
        ));
        assert!(matches!(
            RecordFile::open(&path, 6),
            Err(Error::Format(FormatError::Misaligned {
                size: 560,
                record_width: 48
            }))
        ));

        let path = write_bytes(dir.path().join("empty.out"), &[]);
        assert!(matches!(
            RecordFile::open(&path, 7),
            Err(Error::Format(FormatError::Empty))
        ));

        let path = write_linear(dir.path().join("single.out"), 7, &Clock::new(0.0, 1, 1.0));
        assert!(matches!(
            RecordFile::open(&path, 7),
            Err(Error::Format(FormatError::NonIncreasingTime { .. }))
        ));

        let path = write_linear(dir.path().join("reversed.out"), 7, &Clock::new(10.0, 10, -1.0));
        assert!(matches!(
            RecordFile::open(&path, 7),
            Err(Error::Format(FormatError::NonIncreasingTime { .. }))
        ));

        assert!(matches!(
            RecordFile::open(dir.path().join("missing.out"), 7),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn records_and_blocks() {
        let dir = tempdir().unwrap();
        let path = write_linear(dir.path().join("linear.out"), 7, &Clock::new(100.0, 401, 1.0));
        let file = RecordFile::open(&path, 7).unwrap();

        assert_eq!(file.record(1).unwrap(), linear_record(100.0, 7));
        assert_eq!(file.record(401).unwrap(), linear_record(500.0, 7));
        assert!(file.record(402).is_err());

        let block = file.block(&[3, 1, 3], &[1, 4]).unwrap();
        assert_eq!(block.nrows(), 3);
        assert_eq!(block.ncols(), 2);
        assert_eq!(block[(0, 0)], 102.0);
        assert_eq!(block[(0, 1)], 4.0 * 102.0 + 4.0);
        assert_eq!(block[(1, 0)], 100.0);
        assert_eq!(block[(2, 1)], block[(0, 1)]);
    }

    #[test]
    fn data_by_time() {
        let dir = tempdir().unwrap();
        let path = write_linear(dir.path().join("linear.out"), 7, &Clock::new(100.0, 401, 1.0));
        let file = RecordFile::open(&path, 7).unwrap();

        let times = [100.0, 150.4, 150.6, 500.0];

        let nearest = file.data_by_time(&times, &[1, 2], false).unwrap();
        assert_eq!(nearest[(1, 0)], 150.0);
        assert_eq!(nearest[(2, 0)], 151.0);
        assert_eq!(nearest[(3, 1)], 2.0 * 500.0 + 2.0);

        let interpolated = file.data_by_time(&times, &[1, 2], true).unwrap();
        assert!((interpolated[(1, 0)] - 150.4).abs() < 1.0E-9);
        assert!((interpolated[(2, 1)] - (2.0 * 150.6 + 2.0)).abs() < 1.0E-9);
        assert_eq!(interpolated[(0, 1)], 202.0);

        assert!(file.data_by_time(&[99.0], &[1], true).is_err());
    }

    #[test]
    fn common_window() {
        let dir = tempdir().unwrap();
        let early = write_linear(dir.path().join("early.out"), 5, &Clock::new(100.0, 401, 1.0));
        let late = write_linear(dir.path().join("late.out"), 5, &Clock::new(300.0, 601, 1.0));
        let fractional =
            write_linear(dir.path().join("fractional.out"), 5, &Clock::new(100.2, 1006, 0.4));

        let early = RecordFile::open(&early, 5).unwrap();
        let late = RecordFile::open(&late, 5).unwrap();
        let fractional = RecordFile::open(&fractional, 5).unwrap();

        assert_eq!(early.common_start(&late), 300);
        assert_eq!(late.common_start(&early), 300);
        assert_eq!(early.common_end(&late), 500);
        assert_eq!(late.common_end(&early), 500);

        // [100.2, 502.2]
        assert_eq!(fractional.common_start(&early), 101);
        assert_eq!(early.common_start(&fractional), 101);
        assert_eq!(fractional.common_end(&late), 502);
        assert_eq!(late.common_end(&fractional), 502);
    }

    #[test]
    fn concurrent_reads() {
        let dir = tempdir().unwrap();
        let path = write_linear(dir.path().join("linear.out"), 7, &Clock::new(0.0, 1000, 1.0));
        let file = RecordFile::open(&path, 7).unwrap();

        thread::scope(|scope| {
            for field in 2..=7 {
                let file = &file;
                scope.spawn(move || {
                    for record in 1..=1000 {
                        let t = (record - 1) as f64;
                        assert_eq!(
                            file.field(record, field).unwrap(),
                            field as f64 * t + field as f64
                        );
                    }
                });
            }
        });

        let reopened = file.reopen().unwrap();
        assert_eq!(reopened.records(), file.records());
        assert_eq!(reopened.record(500).unwrap(), file.record(500).unwrap());
    }
}
