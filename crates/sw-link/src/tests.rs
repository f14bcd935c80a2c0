//! Unit tests for sw-link.

#[cfg(test)]
mod link {
    use sw_core::AgentId;

    use crate::{Link, LinkSet};

    #[test]
    fn pair_is_normalised() {
        assert_eq!(Link::new(AgentId(5), AgentId(2)), Link { a: AgentId(2), b: AgentId(5) });
    }

    #[test]
    fn partner_lookup() {
        let l = Link::new(AgentId(1), AgentId(4));
        assert_eq!(l.partner(AgentId(1)), Some(AgentId(4)));
        assert_eq!(l.partner(AgentId(4)), Some(AgentId(1)));
        assert_eq!(l.partner(AgentId(2)), None);
        assert!(l.involves(AgentId(4)));
    }

    #[test]
    fn partners_and_retain() {
        let mut set = LinkSet {
            links: vec![
                Link::new(AgentId(0), AgentId(3)),
                Link::new(AgentId(1), AgentId(3)),
                Link::new(AgentId(2), AgentId(4)),
            ],
            candidates: 7,
        };
        assert_eq!(set.partners_of(AgentId(3)), vec![AgentId(0), AgentId(1)]);
        set.retain_agents(|id| id < AgentId(4));
        assert_eq!(set.len(), 2);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.candidates, 0);
    }
}

#[cfg(test)]
mod index {
    use sw_core::{SimRng, Vec3};

    use crate::{BruteForceIndex, IndexKind, ProximityIndex, RTreeIndex, UniformGridIndex};

    fn cloud(n: usize, seed: u64) -> Vec<Vec3> {
        let mut rng = SimRng::new(seed);
        (0..n)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-100.0..=100.0),
                    rng.gen_range(-100.0..=100.0),
                    rng.gen_range(0.0..=20.0),
                )
            })
            .collect()
    }

    #[test]
    fn brute_force_is_strict() {
        let pts = [Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0), Vec3::new(0.0, 19.999, 0.0)];
        let pairs = BruteForceIndex.candidate_pairs(&pts, 20.0);
        assert_eq!(pairs, vec![(0, 2)]);
    }

    #[test]
    fn degenerate_range_yields_nothing() {
        let pts = [Vec3::ZERO, Vec3::ZERO];
        for kind in [IndexKind::BruteForce, IndexKind::Grid, IndexKind::RTree] {
            let mut idx = kind.boxed();
            assert!(idx.candidate_pairs(&pts, 0.0).is_empty());
            assert!(idx.candidate_pairs(&pts, f64::NAN).is_empty());
        }
    }

    #[test]
    fn all_indices_agree() {
        for seed in 0..5 {
            let pts = cloud(400, seed);
            let expected = BruteForceIndex.candidate_pairs(&pts, 20.0);
            assert!(!expected.is_empty());
            assert_eq!(UniformGridIndex::default().candidate_pairs(&pts, 20.0), expected);
            assert_eq!(RTreeIndex.candidate_pairs(&pts, 20.0), expected);
        }
    }

    #[test]
    fn grid_reuse_across_calls() {
        let mut grid = UniformGridIndex::default();
        let a = cloud(200, 1);
        let b = cloud(200, 2);
        let _ = grid.candidate_pairs(&a, 20.0);
        assert_eq!(grid.candidate_pairs(&b, 20.0), BruteForceIndex.candidate_pairs(&b, 20.0));
    }

    #[test]
    fn negative_coordinates_bucket_correctly() {
        let pts = [Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, 0.5, 0.0)];
        assert_eq!(UniformGridIndex::default().candidate_pairs(&pts, 2.0), vec![(0, 1)]);
    }

    #[test]
    fn huge_coordinates_do_not_overflow_grid() {
        let pts = [
            Vec3::new(1e300, 0.0, 5.0),
            Vec3::new(1e300, 1.0, 5.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(-1e300, -1e300, -1e300),
        ];
        let expected = BruteForceIndex.candidate_pairs(&pts, 20.0);
        assert_eq!(expected, vec![(0, 1)]);
        assert_eq!(UniformGridIndex::default().candidate_pairs(&pts, 20.0), expected);
    }

    #[test]
    fn index_kind_parsing() {
        assert_eq!("grid".parse::<IndexKind>().unwrap(), IndexKind::Grid);
        assert_eq!("R-Tree".parse::<IndexKind>().unwrap(), IndexKind::RTree);
        assert_eq!("brute-force".parse::<IndexKind>().unwrap(), IndexKind::BruteForce);
        assert!("kd".parse::<IndexKind>().is_err());
        assert_eq!(IndexKind::RTree.boxed().name(), "rtree");
    }
}

#[cfg(test)]
mod builder {
    use sw_agent::{AgentState, AgentStoreBuilder};
    use sw_core::{AgentId, LinkParams, SimRng, Vec3};

    use crate::{BruteForceIndex, IndexKind, ProximityLinkBuilder};

    fn params(p: f64) -> LinkParams {
        LinkParams { comm_range: 20.0, link_probability: p }
    }

    #[test]
    fn probability_one_links_every_candidate() {
        let (store, _) = AgentStoreBuilder::new(200, 3).build();
        let mut b = ProximityLinkBuilder::new(BruteForceIndex, &params(1.0));
        let set = b.rebuild(store.as_slice(), &mut SimRng::new(1));
        assert_eq!(set.len(), set.candidates);
        assert!(set.candidates > 0);
    }

    #[test]
    fn probability_zero_links_nothing() {
        let (store, _) = AgentStoreBuilder::new(200, 3).build();
        let mut b = ProximityLinkBuilder::new(BruteForceIndex, &params(0.0));
        let set = b.rebuild(store.as_slice(), &mut SimRng::new(1));
        assert!(set.is_empty());
        assert!(set.candidates > 0);
    }

    #[test]
    fn links_respect_range_and_skip_failed() {
        let (mut store, _) = AgentStoreBuilder::new(300, 8).build();
        for id in (0..300).step_by(3) {
            store.get_mut(AgentId(id)).unwrap().set_state(AgentState::Failed);
        }
        let mut b = ProximityLinkBuilder::new(BruteForceIndex, &params(0.5));
        let set = b.rebuild(store.as_slice(), &mut SimRng::new(2));
        assert!(!set.is_empty());
        for l in set.iter() {
            let a = store.get(l.a).unwrap();
            let c = store.get(l.b).unwrap();
            assert!(a.is_active() && c.is_active());
            assert!(a.position.distance(c.position) < 20.0);
            assert!(l.a < l.b);
        }
    }

    #[test]
    fn exact_range_is_excluded() {
        let (mut store, _) = AgentStoreBuilder::new(2, 1).build();
        store.get_mut(AgentId(0)).unwrap().position = Vec3::ZERO;
        store.get_mut(AgentId(1)).unwrap().position = Vec3::new(12.0, 16.0, 0.0);
        let mut b = ProximityLinkBuilder::new(BruteForceIndex, &params(1.0));
        assert!(b.rebuild(store.as_slice(), &mut SimRng::new(0)).is_empty());
    }

    #[test]
    fn same_links_from_every_index() {
        let (store, _) = AgentStoreBuilder::new(500, 4).build();
        let reference = ProximityLinkBuilder::new(BruteForceIndex, &params(0.3))
            .rebuild(store.as_slice(), &mut SimRng::new(77));
        for kind in [IndexKind::Grid, IndexKind::RTree] {
            let got = ProximityLinkBuilder::new(kind.boxed(), &params(0.3))
                .rebuild(store.as_slice(), &mut SimRng::new(77));
            assert_eq!(got, reference, "{kind:?}");
        }
    }
}
