//! Unit tests for tm-demand.

#[cfg(test)]
mod helpers {
    use tm_core::{Mode, ModeId, PredefinedModeType, ZoneId};

    use crate::{DemandError, DemandResult, NumberFormat};

    pub fn zone_ref(key: &str) -> DemandResult<ZoneId> {
        match key {
            "z1" => Ok(ZoneId(0)),
            "z2" => Ok(ZoneId(1)),
            "z3" => Ok(ZoneId(2)),
            other => Err(DemandError::InvalidValue(other.to_owned())),
        }
    }

    pub fn zone_name(z: ZoneId) -> String {
        format!("z{}", z.0 + 1)
    }

    pub fn fmt() -> NumberFormat {
        NumberFormat::default()
    }

    pub fn car(id: u16, doc_id: &str) -> Mode {
        Mode::predefined(ModeId(id), doc_id, PredefinedModeType::Car)
    }
}

#[cfg(test)]
mod raw {
    use tm_core::ZoneId;

    use super::helpers::{fmt, zone_ref};
    use crate::{DemandError, MatrixEncoding, MatrixShapeError, decode};

    fn raw(text: &str, os: &str, ds: &str) -> MatrixEncoding {
        MatrixEncoding::Raw {
            text:                  text.to_owned(),
            origin_separator:      os.to_owned(),
            destination_separator: ds.to_owned(),
        }
    }

    #[test]
    fn identical_separators_nine_values_is_three_by_three() {
        let m = decode(&raw("1,2,3,4,5,6,7,8,9", ",", ","), 3, 1.0, &fmt(), zone_ref).unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.get(ZoneId(1), ZoneId(2)), 6.0);
        assert_eq!(m.get(ZoneId(2), ZoneId(0)), 7.0);
    }

    #[test]
    fn identical_separators_ten_values_is_not_square() {
        let err = decode(&raw("1,2,3,4,5,6,7,8,9,10", ",", ","), 3, 1.0, &fmt(), zone_ref).unwrap_err();
        assert_eq!(err, DemandError::MalformedMatrix(MatrixShapeError::NotSquare { count: 10 }));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn distinct_separators() {
        let m = decode(&raw("0,5,7+3,0,2+1,1,0", "+", ","), 3, 1.0, &fmt(), zone_ref).unwrap();
        assert_eq!(m.row(ZoneId(0)), &[0.0, 5.0, 7.0]);
        assert_eq!(m.total(), 19.0);
    }

    #[test]
    fn ragged_row_names_row_and_columns() {
        let err = decode(&raw("0,5,7+3,0+1,1,0", "+", ","), 3, 1.0, &fmt(), zone_ref).unwrap_err();
        assert_eq!(
            err,
            DemandError::MalformedMatrix(MatrixShapeError::RowLength { row: 2, columns: 2, expected: 3 })
        );
    }

    #[test]
    fn metacharacter_separators_split_literally() {
        for (os, ds) in [("*", "^"), ("^", "+"), ("+", "*"), ("|", ".")] {
            let text = ["1", "2", "3", "4"].chunks(2).map(|r| r.join(ds)).collect::<Vec<_>>().join(os);
            let m = decode(&raw(&text, os, ds), 2, 1.0, &fmt(), zone_ref).unwrap();
            assert_eq!(m.get(ZoneId(1), ZoneId(0)), 3.0, "separators {os:?}/{ds:?}");
        }
    }

    #[test]
    fn trailing_separator_and_whitespace_tolerated() {
        let m = decode(&raw(" 1, 2 + 3 ,4 +", "+", ","), 2, 1.0, &fmt(), zone_ref).unwrap();
        assert_eq!(m.get(ZoneId(1), ZoneId(1)), 4.0);
    }

    #[test]
    fn size_must_match_zoning() {
        let err = decode(&raw("1,2+3,4", "+", ","), 3, 1.0, &fmt(), zone_ref).unwrap_err();
        assert_eq!(
            err,
            DemandError::MalformedMatrix(MatrixShapeError::ZoneCountMismatch { expected: 3, found: 2 })
        );
    }

    #[test]
    fn pcu_scales_stored_values() {
        let m = decode(&raw("30", "+", ","), 1, 2.0, &fmt(), zone_ref).unwrap();
        assert_eq!(m.get(ZoneId(0), ZoneId(0)), 60.0);
    }

    #[test]
    fn bad_values_rejected() {
        assert_eq!(
            decode(&raw("1,x+3,4", "+", ","), 2, 1.0, &fmt(), zone_ref).unwrap_err(),
            DemandError::InvalidValue("x".into())
        );
        assert_eq!(
            decode(&raw("1,-2+3,4", "+", ","), 2, 1.0, &fmt(), zone_ref).unwrap_err(),
            DemandError::InvalidValue("-2".into())
        );
        assert_eq!(
            decode(&raw("1", "", ","), 1, 1.0, &fmt(), zone_ref).unwrap_err(),
            DemandError::EmptySeparator
        );
        assert_eq!(
            decode(&raw("1", "+", ","), 1, 0.0, &fmt(), zone_ref).unwrap_err(),
            DemandError::InvalidPcu(0.0)
        );
    }

    #[test]
    fn comma_decimal_separator() {
        let number = crate::NumberFormat { decimal_separator: ',', decimal_places: 2 };
        let m = decode(&raw("1,5;2;3;4,25", ";", ";"), 2, 1.0, &number, zone_ref).unwrap();
        assert_eq!(m.get(ZoneId(0), ZoneId(0)), 1.5);
        assert_eq!(m.get(ZoneId(1), ZoneId(1)), 4.25);
    }
}

#[cfg(test)]
mod row {
    use tm_core::ZoneId;

    use super::helpers::{fmt, zone_ref};
    use crate::{DemandError, MatrixEncoding, MatrixShapeError, RowEntry, decode};

    fn rows(entries: &[(&str, &str)]) -> MatrixEncoding {
        MatrixEncoding::Row {
            separator: ",".to_owned(),
            rows: entries
                .iter()
                .map(|(o, v)| RowEntry { origin: (*o).to_owned(), values: (*v).to_owned() })
                .collect(),
        }
    }

    #[test]
    fn origins_by_reference_destinations_by_position() {
        let m = decode(&rows(&[("z3", "1,2,3"), ("z1", "4,5,6"), ("z2", "0,0,7")]), 3, 1.0, &fmt(), zone_ref)
            .unwrap();
        assert_eq!(m.row(ZoneId(2)), &[1.0, 2.0, 3.0]);
        assert_eq!(m.row(ZoneId(0)), &[4.0, 5.0, 6.0]);
        assert_eq!(m.row(ZoneId(1)), &[0.0, 0.0, 7.0]);
    }

    #[test]
    fn repeated_origin_is_rejected() {
        let err = decode(&rows(&[("z1", "1,2,3"), ("z1", "9,9,9"), ("z2", "0,0,0")]), 3, 1.0, &fmt(), zone_ref)
            .unwrap_err();
        assert_eq!(
            err,
            DemandError::MalformedMatrix(MatrixShapeError::DuplicateOrigin { origin: "z1".into(), row: 2 })
        );
    }

    #[test]
    fn missing_origin_is_rejected() {
        let err = decode(&rows(&[("z1", "1,2,3"), ("z2", "4,5,6")]), 3, 1.0, &fmt(), zone_ref).unwrap_err();
        assert_eq!(
            err,
            DemandError::MalformedMatrix(MatrixShapeError::MissingOrigins { expected: 3, found: 2 })
        );
    }

    #[test]
    fn short_first_row_is_row_one() {
        let err = decode(&rows(&[("z1", "1,2"), ("z2", "1,2,3")]), 3, 1.0, &fmt(), zone_ref).unwrap_err();
        assert_eq!(
            err,
            DemandError::MalformedMatrix(MatrixShapeError::RowLength { row: 1, columns: 2, expected: 3 })
        );
        let msg = err.to_string();
        assert!(msg.contains("row 1") && msg.contains("2 columns"), "{msg}");
    }

    #[test]
    fn unknown_origin_propagates_resolver_error() {
        let err = decode(&rows(&[("nope", "1,2,3")]), 3, 1.0, &fmt(), zone_ref).unwrap_err();
        assert_eq!(err, DemandError::InvalidValue("nope".into()));
    }
}

#[cfg(test)]
mod cells {
    use tm_core::ZoneId;

    use super::helpers::{fmt, zone_ref};
    use crate::{Cell, DemandError, MatrixEncoding, MatrixShapeError, decode};

    fn cell(o: &str, d: &str, value: f64) -> Cell {
        Cell { origin: o.into(), destination: d.into(), value }
    }

    #[test]
    fn omitted_cells_are_zero() {
        let enc = MatrixEncoding::CellByCell(vec![cell("z1", "z3", 4.0), cell("z2", "z1", 1.5)]);
        let m = decode(&enc, 3, 1.0, &fmt(), zone_ref).unwrap();
        assert_eq!(m.get(ZoneId(0), ZoneId(2)), 4.0);
        assert_eq!(m.get(ZoneId(1), ZoneId(0)), 1.5);
        assert_eq!(m.total(), 5.5);
    }

    #[test]
    fn repeated_cell_is_rejected() {
        let enc = MatrixEncoding::CellByCell(vec![cell("z1", "z2", 1.0), cell("z3", "z1", 2.0), cell("z1", "z2", 5.0)]);
        assert_eq!(
            decode(&enc, 3, 1.0, &fmt(), zone_ref).unwrap_err(),
            DemandError::MalformedMatrix(MatrixShapeError::DuplicateCell {
                origin:      "z1".into(),
                destination: "z2".into(),
            })
        );
    }

    #[test]
    fn negative_cell_rejected() {
        let enc = MatrixEncoding::CellByCell(vec![cell("z1", "z2", -1.0)]);
        assert!(matches!(decode(&enc, 3, 1.0, &fmt(), zone_ref), Err(DemandError::InvalidValue(_))));
    }
}

#[cfg(test)]
mod encoding {
    use tm_core::ZoneId;

    use super::helpers::{fmt, zone_name, zone_ref};
    use crate::{
        Cell, CodecSettings, DemandError, MatrixEncoding, MatrixEncodingKind, MatrixShapeError,
        NumberFormat, OdMatrix, RowEntry, decode, encode,
    };

    fn sample() -> OdMatrix {
        OdMatrix::from_row_major(2, vec![60.0, 0.0, 3.0, 0.5]).unwrap()
    }

    #[test]
    fn row_major_values_must_fill_the_square() {
        assert_eq!(
            OdMatrix::from_row_major(2, vec![1.0, 2.0, 3.0]).unwrap_err(),
            DemandError::MalformedMatrix(MatrixShapeError::ValueCount { size: 2, found: 3 })
        );
    }

    #[test]
    fn raw_divides_by_pcu() {
        let enc = encode(&sample(), MatrixEncodingKind::Raw, 2.0, &CodecSettings::default(), zone_name).unwrap();
        assert_eq!(
            enc,
            MatrixEncoding::Raw {
                text:                  "30,0+1.5,0.25".into(),
                origin_separator:      "+".into(),
                destination_separator: ",".into(),
            }
        );
    }

    #[test]
    fn row_and_cells() {
        let settings = CodecSettings::default();
        let row = encode(&sample(), MatrixEncodingKind::Row, 1.0, &settings, zone_name).unwrap();
        let MatrixEncoding::Row { rows, .. } = row else { panic!("expected row encoding") };
        assert_eq!(rows[1], RowEntry { origin: "z2".into(), values: "3,0.5".into() });

        let cells = encode(&sample(), MatrixEncodingKind::CellByCell, 1.0, &settings, zone_name).unwrap();
        let MatrixEncoding::CellByCell(cells) = cells else { panic!("expected cell encoding") };
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], Cell { origin: "z1".into(), destination: "z1".into(), value: 60.0 });
    }

    #[test]
    fn pcu_round_trip_of_thirty_vehicles() {
        let raw = MatrixEncoding::Raw { text: "30".into(), origin_separator: "+".into(), destination_separator: ",".into() };
        let m = decode(&raw, 1, 2.0, &fmt(), zone_ref).unwrap();
        assert_eq!(m.get(ZoneId(0), ZoneId(0)), 60.0);
        let back = encode(&m, MatrixEncodingKind::Raw, 2.0, &CodecSettings::default(), zone_name).unwrap();
        let MatrixEncoding::Raw { text, .. } = back else { panic!("expected raw encoding") };
        assert_eq!(text, "30");
    }

    #[test]
    fn number_format_trims_and_localises() {
        let f = NumberFormat { decimal_separator: ',', decimal_places: 3 };
        assert_eq!(f.format(1.23456), "1,235");
        assert_eq!(f.format(2.0), "2");
        assert_eq!(f.format(-0.0001), "0");
        assert_eq!(NumberFormat { decimal_separator: '.', decimal_places: 0 }.format(12.6), "13");
        assert_eq!(f.parse("1,5").unwrap(), 1.5);
    }
}

#[cfg(test)]
mod codec_properties {
    use proptest::prelude::*;

    use super::helpers::{fmt, zone_name};
    use crate::{
        CodecSettings, DemandError, MatrixEncodingKind, OdMatrix, decode, encode,
    };
    use tm_core::ZoneId;

    fn zone_by_name(key: &str) -> Result<ZoneId, DemandError> {
        key.strip_prefix('z')
            .and_then(|n| n.parse::<u32>().ok())
            .map(|n| ZoneId(n - 1))
            .ok_or_else(|| DemandError::InvalidValue(key.to_owned()))
    }

    /// Cells on a 1/8 grid survive the default formatting exactly.
    fn exact_matrix() -> impl Strategy<Value = OdMatrix> {
        (1usize..6).prop_flat_map(|n| {
            prop::collection::vec(0u32..10_000, n * n).prop_map(move |cells| {
                OdMatrix::from_row_major(n, cells.into_iter().map(|c| c as f64 / 8.0).collect()).unwrap()
            })
        })
    }

    /// Cells with more fractional digits than `decimal_places`.
    fn fine_matrix() -> impl Strategy<Value = OdMatrix> {
        (1usize..6).prop_flat_map(|n| {
            prop::collection::vec(0.0f64..10_000.0, n * n)
                .prop_map(move |cells| OdMatrix::from_row_major(n, cells).unwrap())
        })
    }

    fn kinds() -> impl Strategy<Value = MatrixEncodingKind> {
        prop::sample::select(vec![MatrixEncodingKind::Raw, MatrixEncodingKind::Row, MatrixEncodingKind::CellByCell])
    }

    fn pcus() -> impl Strategy<Value = f64> {
        prop::sample::select(vec![0.2, 1.0, 1.8, 2.0, 3.0])
    }

    /// Encode and decode twice; the two decoded matrices must agree to 1e-9
    /// and stay within formatting precision of `matrix`.
    fn check_round_trip(matrix: &OdMatrix, kind: MatrixEncodingKind, pcu: f64) -> Result<(), TestCaseError> {
        let settings = CodecSettings::default();
        let n = matrix.size();
        let first = encode(matrix, kind, pcu, &settings, zone_name).unwrap();
        let decoded = decode(&first, n, pcu, &fmt(), zone_by_name).unwrap();
        let second = encode(&decoded, kind, pcu, &settings, zone_name).unwrap();
        let again = decode(&second, n, pcu, &fmt(), zone_by_name).unwrap();

        // Half a unit in the last written place, in pcu/hour.
        let precision = 0.5 * 10f64.powi(-(settings.number.decimal_places as i32)) * pcu;
        for o in 0..n as u32 {
            for d in 0..n as u32 {
                let (a, b) = (decoded.get(ZoneId(o), ZoneId(d)), again.get(ZoneId(o), ZoneId(d)));
                prop_assert!((a - b).abs() < 1e-9, "cell ({o},{d}): {a} vs {b}");
                let orig = matrix.get(ZoneId(o), ZoneId(d));
                prop_assert!((a - orig).abs() <= precision + 1e-9, "cell ({o},{d}): {a} vs {orig}");
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn decode_encode_decode_is_stable(matrix in exact_matrix(), pcu in pcus(), kind in kinds()) {
            check_round_trip(&matrix, kind, pcu)?;
        }

        #[test]
        fn excess_digits_are_rounded_once(matrix in fine_matrix(), pcu in pcus(), kind in kinds()) {
            check_round_trip(&matrix, kind, pcu)?;
        }
    }
}

#[cfg(test)]
mod demands {
    use tm_core::{CoreError, EntityKind, ModeId, SyncDocIds, TimePeriodId};

    use super::helpers::car;
    use crate::{DemandError, Demands, OdMatrix};

    #[test]
    fn default_user_class_binds_single_mode() {
        let modes = vec![car(0, "car")];
        let mut d = Demands::new();
        assert!(d.inject_default_traveller_type());
        assert!(d.inject_default_user_class(&modes).unwrap());
        assert_eq!(d.user_classes[0].mode, ModeId(0));
        assert_eq!(d.user_classes[0].doc_id, "default");
        // Already populated: nothing more to inject.
        assert!(!d.inject_default_user_class(&modes).unwrap());
    }

    #[test]
    fn default_user_class_with_two_modes_is_ambiguous() {
        let modes = vec![car(0, "car"), car(1, "taxi")];
        let mut d = Demands::new();
        d.inject_default_traveller_type();
        assert_eq!(
            d.inject_default_user_class(&modes).unwrap_err(),
            DemandError::Core(CoreError::AmbiguousDefault { kind: EntityKind::Mode, candidates: 2 })
        );
        assert!(d.user_classes.is_empty());
    }

    #[test]
    fn default_user_class_with_two_traveller_types_is_ambiguous() {
        let modes = vec![car(0, "car")];
        let mut d = Demands::new();
        d.add_traveller_type("a");
        d.add_traveller_type("b");
        assert_eq!(
            d.inject_default_user_class(&modes).unwrap_err(),
            DemandError::Core(CoreError::AmbiguousDefault { kind: EntityKind::TravellerType, candidates: 2 })
        );
    }

    #[test]
    fn second_matrix_for_same_pair_fails_without_mutation() {
        let car = car(0, "car");
        let mut d = Demands::new();
        let am = d.add_time_period("AM", 7 * 3_600, 3_600);
        d.register_od_matrix(&car, am, OdMatrix::from_row_major(1, vec![5.0]).unwrap()).unwrap();

        let err = d.register_od_matrix(&car, am, OdMatrix::from_row_major(1, vec![9.0]).unwrap()).unwrap_err();
        assert_eq!(err, DemandError::MultipleMatrices { mode: "car".into(), time_period: "AM".into() });
        assert_eq!(d.od.get(car.id, am).unwrap().total(), 5.0);
        assert_eq!(d.od.len(), 1);
    }

    #[test]
    fn same_mode_other_period_is_fine() {
        let car = car(0, "car");
        let mut d = Demands::new();
        let am = d.add_time_period("AM", 0, 3_600);
        let pm = d.add_time_period("PM", 3_600, 3_600);
        d.register_od_matrix(&car, am, OdMatrix::zeros(2)).unwrap();
        d.register_od_matrix(&car, pm, OdMatrix::zeros(2)).unwrap();
        assert!(d.od.contains(car.id, TimePeriodId(1)));
    }

    #[test]
    fn user_class_attribution_requires_one_candidate() {
        let car = car(0, "car");
        let mut d = Demands::new();
        let tt = d.add_traveller_type("tt");
        assert_eq!(
            d.user_class_for_mode(&car).unwrap_err(),
            DemandError::AmbiguousUserClass { mode: "car".into(), candidates: 0 }
        );
        d.add_user_class("uc1", car.id, tt);
        assert_eq!(d.user_class_for_mode(&car).unwrap().doc_id, "uc1");
        d.add_user_class("uc2", car.id, tt);
        assert_eq!(
            d.user_class_for_mode(&car).unwrap_err(),
            DemandError::AmbiguousUserClass { mode: "car".into(), candidates: 2 }
        );
    }

    #[test]
    fn sync_covers_configuration() {
        let mut d = Demands::new();
        let tt = d.add_traveller_type("commuter");
        d.add_user_class("uc", ModeId(0), tt);
        d.add_time_period("AM", 0, 60);
        assert_eq!(d.sync_doc_ids(), 3);
        assert_eq!(d.time_periods[0].doc_id, "0");
    }
}

#[cfg(test)]
mod time {
    use crate::{DemandError, DurationUnit, format_clock_time, parse_clock_time};

    #[test]
    fn clock_times() {
        assert_eq!(parse_clock_time("07:30").unwrap(), 27_000);
        assert_eq!(parse_clock_time("00:00:59").unwrap(), 59);
        assert_eq!(parse_clock_time("25:00").unwrap(), 90_000);
        assert_eq!(format_clock_time(27_000), "07:30:00");
    }

    #[test]
    fn bad_clock_times() {
        for bad in ["7", "07:60", "a:b", "1:2:3:4", "07:30:75"] {
            assert_eq!(parse_clock_time(bad).unwrap_err(), DemandError::TimeFormat(bad.into()));
        }
    }

    #[test]
    fn duration_units() {
        assert_eq!("min".parse::<DurationUnit>().unwrap().to_secs(1.5), 90);
        assert_eq!("h".parse::<DurationUnit>().unwrap().to_secs(2.0), 7_200);
        assert!("fortnight".parse::<DurationUnit>().is_err());
    }
}
