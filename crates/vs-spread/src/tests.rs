//! Unit tests for vs-spread.

#[cfg(test)]
mod grid_tests {
    use vs_core::{MemberId, SimParams, VsError};

    use crate::GridGeometry;

    fn ids(raw: &[u32]) -> Vec<MemberId> {
        raw.iter().copied().map(MemberId).collect()
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(GridGeometry::new(0, 3), Err(VsError::Config(_))));
        assert!(matches!(GridGeometry::new(9, 0), Err(VsError::Config(_))));
    }

    #[test]
    fn from_params_matches_fields() {
        let params = SimParams {
            group_size:       12,
            elements_in_row:  5,
            infection_factor: 1,
            tick_interval_ms: 10,
            seed:             0,
        };
        let g = GridGeometry::from_params(&params).unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.last_row(), 2);
        assert_eq!(g.position(MemberId(11)), (2, 1));
    }

    #[test]
    fn center_of_3x3_sees_all_others() {
        let g = GridGeometry::new(9, 3).unwrap();
        assert_eq!(g.neighbors(MemberId(4)), ids(&[0, 1, 2, 3, 5, 6, 7, 8]));
    }

    #[test]
    fn corner_and_edge_counts() {
        let g = GridGeometry::new(25, 5).unwrap();
        assert_eq!(g.neighbors(MemberId(0)).len(), 3);
        assert_eq!(g.neighbors(MemberId(24)).len(), 3);
        assert_eq!(g.neighbors(MemberId(2)).len(), 5);
        assert_eq!(g.neighbors(MemberId(12)).len(), 8);
    }

    #[test]
    fn top_row_has_no_row_above() {
        let g = GridGeometry::new(25, 5).unwrap();
        for top in 0..5 {
            for near in g.neighbors(MemberId(top)) {
                let (row, _) = g.position(near);
                assert!(row <= 1, "{near} is not adjacent to top-row member {top}");
            }
        }
    }

    #[test]
    fn last_column_does_not_wrap() {
        let g = GridGeometry::new(25, 5).unwrap();
        // Member 4 is row 0, col 4; member 5 is row 1, col 0.
        let n = g.neighbors(MemberId(4));
        assert_eq!(n, ids(&[3, 8, 9]));
        assert!(!n.contains(&MemberId(5)));

        let n = g.neighbors(MemberId(9));
        assert_eq!(n, ids(&[3, 4, 8, 13, 14]));
        assert!(!n.contains(&MemberId(10)));
    }

    #[test]
    fn first_column_does_not_wrap_back() {
        let g = GridGeometry::new(25, 5).unwrap();
        assert_eq!(g.neighbors(MemberId(5)), ids(&[0, 1, 6, 10, 11]));
    }

    #[test]
    fn partial_last_row_is_scanned() {
        // 0 1 2
        // 3 4 5
        // 6
        let g = GridGeometry::new(7, 3).unwrap();
        assert_eq!(g.neighbors(MemberId(4)), ids(&[0, 1, 2, 3, 5, 6]));
        assert_eq!(g.neighbors(MemberId(6)), ids(&[3, 4]));
        assert_eq!(g.member_at(2, 1), None);
    }

    #[test]
    fn two_by_two_fully_adjacent() {
        let g = GridGeometry::new(4, 2).unwrap();
        assert_eq!(g.neighbors(MemberId(0)), ids(&[1, 2, 3]));
    }

    #[test]
    fn single_column_grid() {
        let g = GridGeometry::new(4, 1).unwrap();
        assert_eq!(g.neighbors(MemberId(0)), ids(&[1]));
        assert_eq!(g.neighbors(MemberId(2)), ids(&[1, 3]));
    }

    #[test]
    fn columns_for_width_packs_cells() {
        // 24 px cells with 10 px spacing.
        assert_eq!(GridGeometry::columns_for_width(375.0, 24.0, 10.0), 11);
        assert_eq!(GridGeometry::columns_for_width(30.0, 24.0, 10.0), 0);
        assert_eq!(GridGeometry::columns_for_width(100.0, 0.0, 0.0), 0);
    }
}

#[cfg(test)]
mod propagate_tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use vs_core::MemberId;

    use crate::{GridGeometry, SpreadParams, infected_seeds, propagate, spread_from};

    fn status_with(group_size: usize, infected: &[usize]) -> Vec<bool> {
        let mut s = vec![false; group_size];
        for &i in infected {
            s[i] = true;
        }
        s
    }

    fn params(infection_factor: usize, elements_in_row: usize) -> SpreadParams {
        SpreadParams { infection_factor, elements_in_row }
    }

    #[test]
    fn no_carriers_no_spread() {
        let mut rng = SmallRng::seed_from_u64(1);
        let status = vec![false; 25];
        assert!(propagate(&status, params(8, 5), &mut rng).is_empty());
    }

    #[test]
    fn zero_factor_disables_spread() {
        let mut rng = SmallRng::seed_from_u64(1);
        let status = status_with(9, &[4]);
        assert!(propagate(&status, params(0, 3), &mut rng).is_empty());
        assert!(propagate(&status, params(3, 0), &mut rng).is_empty());
    }

    #[test]
    fn seeds_are_ascending_infected_indices() {
        let status = status_with(6, &[5, 1, 3]);
        let seeds: Vec<_> = infected_seeds(&status).collect();
        assert_eq!(seeds, vec![MemberId(1), MemberId(3), MemberId(5)]);
    }

    #[test]
    fn center_of_3x3_scenario() {
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let status = status_with(9, &[4]);
            let newly = propagate(&status, params(8, 3), &mut rng);
            assert!(!newly.is_empty());
            assert!(!newly.contains(&MemberId(4)));
            let infected_after = 1 + newly.len();
            assert!((2..=9).contains(&infected_after), "got {infected_after}");
        }
    }

    #[test]
    fn center_can_reach_every_neighbor() {
        // Over many draws each of the 8 neighbors is hit at least once, and
        // some tick infects all of them.
        let status = status_with(9, &[4]);
        let mut seen = [false; 9];
        let mut saw_full = false;
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..2_000 {
            let newly = propagate(&status, params(8, 3), &mut rng);
            saw_full |= newly.len() == 8;
            for m in newly {
                seen[m.index()] = true;
            }
        }
        assert!(saw_full);
        assert_eq!(seen.iter().filter(|&&s| s).count(), 8);
    }

    #[test]
    fn two_by_two_factor_one_infects_exactly_one() {
        for seed in 0..200 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let status = status_with(4, &[0]);
            let newly = propagate(&status, params(1, 2), &mut rng);
            assert_eq!(newly.len(), 1);
            let m = *newly.iter().next().unwrap();
            assert!([MemberId(1), MemberId(2), MemberId(3)].contains(&m));
        }
    }

    #[test]
    fn never_resignals_existing_infections() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut status = status_with(30, &[0, 7, 14]);
        for _ in 0..20 {
            let newly = propagate(&status, params(3, 6), &mut rng);
            for m in &newly {
                assert!(!status[m.index()], "{m} was already infected");
            }
            for m in newly {
                status[m.index()] = true;
            }
        }
    }

    #[test]
    fn monotone_over_many_ticks() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut status = status_with(40, &[17]);
        let mut prev = 1;
        for _ in 0..30 {
            let before = status.clone();
            for m in propagate(&status, params(2, 7), &mut rng) {
                status[m.index()] = true;
            }
            for (was, now) in before.iter().zip(&status) {
                assert!(!*was || *now, "an infected member became healthy");
            }
            let count = status.iter().filter(|&&s| s).count();
            assert!(count >= prev);
            prev = count;
        }
    }

    #[test]
    fn per_seed_subset_bound() {
        let g = GridGeometry::new(25, 5).unwrap();
        let mut scratch = Vec::new();
        for factor in 1..=9 {
            for seed in 0..50 {
                let mut rng = SmallRng::seed_from_u64(seed);
                // Interior member 12 with two neighbors already infected.
                let status = status_with(25, &[12, 6, 18]);
                let available = 6;
                let chosen = spread_from(MemberId(12), &status, &g, factor, &mut rng, &mut scratch);
                assert!(chosen.len() >= 1);
                assert!(chosen.len() <= factor.min(available));
                let mut dedup = chosen.to_vec();
                dedup.sort();
                dedup.dedup();
                assert_eq!(dedup.len(), chosen.len(), "subset has duplicates");
            }
        }
    }

    #[test]
    fn seed_with_no_healthy_neighbors_contributes_nothing() {
        let g = GridGeometry::new(4, 2).unwrap();
        let status = vec![true; 4];
        let mut rng = SmallRng::seed_from_u64(3);
        let mut scratch = Vec::new();
        assert!(spread_from(MemberId(0), &status, &g, 3, &mut rng, &mut scratch).is_empty());
        assert!(propagate(&status, params(3, 2), &mut rng).is_empty());
    }

    #[test]
    fn spread_stays_within_neighborhood() {
        let g = GridGeometry::new(25, 5).unwrap();
        let status = status_with(25, &[4]);
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            for m in propagate(&status, params(8, 5), &mut rng) {
                assert!(g.neighbors(MemberId(4)).contains(&m), "{m} is not next to member 4");
            }
        }
    }

    #[test]
    fn same_seed_same_result() {
        let status = status_with(50, &[0, 22, 49]);
        let a = propagate(&status, params(4, 10), &mut SmallRng::seed_from_u64(8));
        let b = propagate(&status, params(4, 10), &mut SmallRng::seed_from_u64(8));
        assert_eq!(a, b);
    }
}
