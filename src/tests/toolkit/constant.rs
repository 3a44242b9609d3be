use crate::{
    navdif::{field, NAVDIF_FIELDS},
    prelude::RecordFile,
    record::FIRST_INDEX,
};

/*
 * Test: panic if given NAVDIF content (time excepted) is not equal to given constant
 */
pub fn is_constant_navdif(navdif: &RecordFile, constant: f64, tolerance: f64) {
    assert_eq!(navdif.fields(), NAVDIF_FIELDS, "not a NAVDIF file");
    for record in FIRST_INDEX..=navdif.records() {
        let values = navdif.record(record).unwrap();
        for (index, value) in values.iter().enumerate() {
            let field = index + FIRST_INDEX;
            if field == field::TIME {
                continue;
            }
            let err = (value - constant).abs();
            if err > tolerance {
                panic!(
                    "record #{} field #{}: {} != {}",
                    record, field, value, constant
                );
            }
        }
    }
}

pub fn is_null_navdif(navdif: &RecordFile, tolerance: f64) {
    is_constant_navdif(navdif, 0.0_f64, tolerance)
}
