//! Unit tests for ba-core primitives.

#[cfg(test)]
mod ids {
    use crate::ParcelId;

    #[test]
    fn index_roundtrip() {
        let id = ParcelId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ParcelId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(ParcelId::INVALID.0, u32::MAX);
        assert_eq!(ParcelId::default(), ParcelId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(ParcelId(7).to_string(), "ParcelId(7)");
    }
}

#[cfg(test)]
mod key {
    use crate::key::{canonicalize, CropKey, FALLOW};

    #[test]
    fn folds_turkish_letters() {
        assert_eq!(canonicalize("Şeker Pancarı"), "SEKER_PANCARI");
        assert_eq!(canonicalize("BUĞDAY"), "BUGDAY");
        assert_eq!(canonicalize("üzüm"), "UZUM");
    }

    #[test]
    fn strips_punctuation_variants() {
        assert_eq!(canonicalize("Mısır (Dane)"), "MISIR_DANE");
        assert_eq!(canonicalize("Mısır-Dane"), "MISIR_DANE");
        assert_eq!(canonicalize("  mısır / dane "), "MISIR_DANE");
    }

    #[test]
    fn spelling_variants_compare_equal() {
        assert_eq!(CropKey::new("Mısır (Dane)"), CropKey::new("MISIR_DANE"));
        assert_eq!(CropKey::new("şeker pancarı"), CropKey::new("Seker-Pancari"));
    }

    #[test]
    fn fallow_key() {
        assert_eq!(CropKey::new("Nadas"), CropKey::fallow());
        assert!(CropKey::new("nadas").is_fallow());
        assert_eq!(CropKey::fallow().as_str(), FALLOW);
    }

    #[test]
    fn empty_name_is_empty_key() {
        assert_eq!(canonicalize("   "), "");
    }
}

#[cfg(test)]
mod scenario {
    use crate::{Algorithm, Scenario};

    #[test]
    fn parses_canonical_keys() {
        assert_eq!("water_saving".parse::<Scenario>().unwrap(), Scenario::WaterSaving);
        assert_eq!("max_profit".parse::<Scenario>().unwrap(), Scenario::MaxProfit);
        assert_eq!("balanced".parse::<Scenario>().unwrap(), Scenario::Balanced);
        assert_eq!("current".parse::<Scenario>().unwrap(), Scenario::Current);
    }

    #[test]
    fn parses_locale_spellings() {
        assert_eq!("Mevcut".parse::<Scenario>().unwrap(), Scenario::Current);
        assert_eq!("su tasarruf".parse::<Scenario>().unwrap(), Scenario::WaterSaving);
        assert_eq!("dengeli".parse::<Scenario>().unwrap(), Scenario::Balanced);
    }

    #[test]
    fn unknown_scenario_errors() {
        assert!("maximal".parse::<Scenario>().is_err());
    }

    #[test]
    fn algorithm_aliases() {
        assert_eq!("GA".parse::<Algorithm>().unwrap(), Algorithm::Ga);
        assert_eq!("bee_colony".parse::<Algorithm>().unwrap(), Algorithm::Abc);
        assert_eq!("ant".parse::<Algorithm>().unwrap(), Algorithm::Aco);
        assert!("tabu".parse::<Algorithm>().is_err());
    }

    #[test]
    fn keys_are_stable() {
        for s in Scenario::ALL {
            assert_eq!(s.as_key().parse::<Scenario>().unwrap(), s);
        }
        for a in Algorithm::ALL {
            assert_eq!(a.as_key().parse::<Algorithm>().unwrap(), a);
        }
    }
}

#[cfg(test)]
mod vector {
    use crate::vector::{normalize, AllocationVector, SUM_TOLERANCE};

    fn assert_valid(v: &AllocationVector) {
        assert!(v.iter().all(|&x| x >= 0.0), "negative entry in {v:?}");
        assert!(
            (v.sum() - 1.0).abs() <= SUM_TOLERANCE,
            "sum {} out of tolerance",
            v.sum()
        );
    }

    #[test]
    fn positive_vector_sums_to_one() {
        let v = normalize(&[2.0, 1.0, 1.0]);
        assert_valid(&v);
        assert!((v[0] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn negatives_clamped_to_zero() {
        let v = normalize(&[-3.0, 1.0, 1.0]);
        assert_valid(&v);
        assert_eq!(v[0], 0.0);
        assert!((v[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_becomes_uniform() {
        let v = normalize(&[0.0, 0.0, 0.0, 0.0]);
        assert_valid(&v);
        for i in 0..4 {
            assert!((v[i] - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn all_negative_becomes_uniform() {
        let v = normalize(&[-1.0, -2.0]);
        assert_valid(&v);
        assert_eq!(v[0], 0.5);
    }

    #[test]
    fn non_finite_entries_treated_as_zero() {
        let v = normalize(&[f64::NAN, 1.0, f64::INFINITY]);
        assert_valid(&v);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 1.0);
    }

    #[test]
    fn empty_input_is_empty_vector() {
        let v = normalize(&[]);
        assert!(v.is_empty());
    }

    #[test]
    fn single_puts_all_mass_on_one_crop() {
        let v = AllocationVector::single(3, 1);
        assert_eq!(v.as_slice(), &[0.0, 1.0, 0.0]);
    }
}

#[cfg(test)]
mod rng {
    use crate::SolverRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SolverRng::new(12345);
        let mut r2 = SolverRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn child_streams_are_order_independent() {
        let root = SolverRng::new(7);
        let mut a = root.child(3);
        let _ = root.child(99); // deriving other children must not disturb stream 3
        let mut b = root.child(3);
        let x: u64 = a.random();
        let y: u64 = b.random();
        assert_eq!(x, y);
    }

    #[test]
    fn adjacent_children_differ() {
        let root = SolverRng::new(1);
        let mut a = root.child(0);
        let mut b = root.child(1);
        let x: u64 = a.random();
        let y: u64 = b.random();
        assert_ne!(x, y, "seeds for adjacent streams should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SolverRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(0.0f64..1.0);
            assert!((0.0..1.0).contains(&v));
        }
    }
}

#[cfg(test)]
mod model {
    use crate::model::{Crop, CropAllocationRow, OptimizationResult, Parcel, PlanTotals};
    use crate::vector::AllocationVector;
    use crate::{CropKey, ParcelId};

    fn crops() -> Vec<Crop> {
        vec![Crop::new("A", 300.0, 2000.0), Crop::new("B", 600.0, 4000.0)]
    }

    #[test]
    fn row_totals_derive_from_area() {
        let row = CropAllocationRow::new(CropKey::new("A"), 10.0, 300.0, 2000.0);
        assert_eq!(row.total_water, 3000.0);
        assert_eq!(row.total_profit, 20000.0);
    }

    #[test]
    fn recompute_after_area_change() {
        let mut row = CropAllocationRow::new(CropKey::new("A"), 10.0, 300.0, 2000.0);
        row.area_da = 5.0;
        row.recompute();
        assert_eq!(row.total_water, 1500.0);
    }

    #[test]
    fn totals_sum_rows() {
        let rows = vec![
            CropAllocationRow::new(CropKey::new("A"), 4.0, 300.0, 2000.0),
            CropAllocationRow::new(CropKey::new("B"), 6.0, 600.0, 4000.0),
        ];
        let t = PlanTotals::from_rows(&rows);
        assert_eq!(t.area_da, 10.0);
        assert_eq!(t.water_m3, 4.0 * 300.0 + 6.0 * 600.0);
        assert!((t.water_per_da() - t.water_m3 / 10.0).abs() < 1e-9);
    }

    #[test]
    fn rows_from_vector_conserves_area() {
        let x = AllocationVector::from_raw(&[0.3, 0.7]);
        let rows = OptimizationResult::rows_from_vector(10.0, &crops(), &x, 1e-3);
        let area: f64 = rows.iter().map(|r| r.area_da).sum();
        assert!((area - 10.0).abs() < 0.1);
    }

    #[test]
    fn rows_from_vector_drops_dust_shares() {
        let x = AllocationVector::from_raw(&[0.9995, 0.0005]);
        let rows = OptimizationResult::rows_from_vector(10.0, &crops(), &x, 1e-3);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].area_da - 10.0).abs() < 0.1);
    }

    #[test]
    fn rows_from_vector_degenerate_inputs() {
        let x = AllocationVector::from_raw(&[0.5, 0.5]);
        assert!(OptimizationResult::rows_from_vector(0.0, &crops(), &x, 1e-3).is_empty());
        assert!(OptimizationResult::rows_from_vector(10.0, &[], &AllocationVector::default(), 1e-3).is_empty());
    }

    #[test]
    fn top_rows_ranked_by_area() {
        let rows = vec![
            CropAllocationRow::new(CropKey::new("A"), 4.0, 300.0, 2000.0),
            CropAllocationRow::new(CropKey::new("B"), 6.0, 600.0, 4000.0),
        ];
        let result = OptimizationResult::from_rows(rows, true, false);
        let top = result.top_rows(1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].crop, CropKey::new("B"));
    }

    #[test]
    fn baseline_totals_from_parcel() {
        let parcel = Parcel::new(ParcelId(0), 10.0).with_baseline(vec![CropAllocationRow::new(
            CropKey::new("A"),
            10.0,
            300.0,
            2000.0,
        )]);
        let b = parcel.baseline_totals();
        assert_eq!(b.water_m3, 3000.0);
        assert_eq!(b.profit_tl, 20000.0);
    }
}
