//! Unit tests for sw-agent.

#[cfg(test)]
mod agent {
    use sw_core::{AgentId, AgentRng, StationId, SwarmError, Vec3, WorldParams};

    use crate::{Agent, AgentState};

    fn spawn(id: u32) -> Agent {
        let mut rng = AgentRng::new(42, AgentId(id));
        Agent::spawn(AgentId(id), &mut rng, &WorldParams::default())
    }

    #[test]
    fn spawn_ranges() {
        let params = WorldParams::default();
        for id in 0..200 {
            let a = spawn(id);
            assert_eq!(a.state, AgentState::Moving);
            assert!(a.position.x.abs() <= params.plane_radius);
            assert!(a.position.y.abs() <= params.plane_radius);
            assert!((params.min_height..=params.spawn_height).contains(&a.position.z));
            assert!(a.velocity.x.abs() <= 2.0 && a.velocity.y.abs() <= 2.0);
            assert!(a.velocity.z.abs() <= 0.5);
            assert!((0.3..=1.0).contains(&a.energy.current));
            assert!((10.0..=50.0).contains(&a.energy.power_consumption_rate));
            assert!((5.0..=25.0).contains(&a.energy.harvesting_rate));
            assert!(a.mission.completed_tasks <= 10);
            assert!(a.mission.assigned_tasks <= 3);
            assert_eq!(a.performance.distance_traveled, 0.0);
            assert_eq!(a.performance.communications_count, 0);
            assert!(a.docked_station.is_none());
        }
    }

    #[test]
    fn spawn_is_deterministic() {
        assert_eq!(spawn(7), spawn(7));
        assert_ne!(spawn(7).position, spawn(8).position);
    }

    #[test]
    fn set_energy_clamps() {
        let mut a = spawn(0);
        a.set_energy(1.7).unwrap();
        assert_eq!(a.energy.current, 1.0);
        a.set_energy(-0.2).unwrap();
        assert_eq!(a.energy.current, 0.0);
        assert!(a.set_energy(f64::NAN).is_err());
    }

    #[test]
    fn failed_agent_rejects_field_edits() {
        let mut a = spawn(3);
        a.set_state(AgentState::Failed);
        let before = a.clone();
        assert!(matches!(a.set_energy(0.5), Err(SwarmError::AgentFailed(AgentId(3)))));
        assert!(matches!(a.set_position(Vec3::ZERO), Err(SwarmError::AgentFailed(_))));
        assert_eq!(a, before);

        // The state itself can still be changed.
        a.set_state(AgentState::Idle);
        assert_eq!(a.state, AgentState::Idle);
    }

    #[test]
    fn non_finite_position_rejected() {
        let mut a = spawn(1);
        let err = a.set_position(Vec3::new(f64::INFINITY, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, SwarmError::InvalidArgument(_)));
    }

    #[test]
    fn leaving_charging_undocks() {
        let mut a = spawn(2);
        a.set_state(AgentState::Charging);
        a.docked_station = Some(StationId(1));
        a.set_state(AgentState::Charging);
        assert_eq!(a.docked_station, Some(StationId(1)));
        a.set_state(AgentState::Moving);
        assert!(a.docked_station.is_none());
    }

    #[test]
    fn state_names() {
        assert_eq!(AgentState::Charging.to_string(), "charging");
        assert_eq!(AgentState::Failed.as_str(), "failed");
        assert_eq!(AgentState::default(), AgentState::Moving);
    }
}

#[cfg(test)]
mod store {
    use sw_core::{AgentId, WorldParams};

    use crate::AgentStoreBuilder;

    #[test]
    fn builder_assigns_contiguous_ids() {
        let (store, rngs) = AgentStoreBuilder::new(5, 1).build();
        assert_eq!(store.len(), 5);
        assert_eq!(rngs.len(), 5);
        let ids: Vec<_> = store.agent_ids().collect();
        assert_eq!(ids, (0..5).map(AgentId).collect::<Vec<_>>());
        assert_eq!(store.next_id(), AgentId(5));
    }

    #[test]
    fn empty_store() {
        let (store, rngs) = AgentStoreBuilder::new(0, 1).build();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
        assert_eq!(store.next_id(), AgentId(0));
        assert!(store.get(AgentId(0)).is_none());
    }

    #[test]
    fn lookup_by_id() {
        let (mut store, _) = AgentStoreBuilder::new(10, 1).build();
        assert_eq!(store.get(AgentId(4)).unwrap().id, AgentId(4));
        assert!(store.contains(AgentId(9)));
        assert!(!store.contains(AgentId(10)));
        store.get_mut(AgentId(4)).unwrap().energy.current = 0.5;
        assert_eq!(store.get(AgentId(4)).unwrap().energy.current, 0.5);
    }

    #[test]
    fn shrink_removes_highest_ids() {
        let params = WorldParams::default();
        let (mut store, mut rngs) = AgentStoreBuilder::new(8, 1).build();
        let removed = store.resize(5, &mut rngs, &params);
        assert_eq!(removed, vec![AgentId(5), AgentId(6), AgentId(7)]);
        assert_eq!(store.len(), 5);
        assert_eq!(rngs.len(), 5);
    }

    #[test]
    fn grow_keeps_existing_agents() {
        let params = WorldParams::default();
        let (mut store, mut rngs) = AgentStoreBuilder::new(3, 1).build();
        let before: Vec<_> = store.iter().cloned().collect();
        assert!(store.resize(6, &mut rngs, &params).is_empty());
        assert_eq!(&store.as_slice()[..3], &before[..]);
        assert_eq!(store.agent_ids().last(), Some(AgentId(5)));
    }

    #[test]
    fn shrink_then_grow_reuses_ids() {
        let params = WorldParams::default();
        let (mut store, mut rngs) = AgentStoreBuilder::new(4, 1).build();
        store.resize(2, &mut rngs, &params);
        store.resize(4, &mut rngs, &params);
        let ids: Vec<_> = store.agent_ids().collect();
        assert_eq!(ids, (0..4).map(AgentId).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_population() {
        let (a, _) = AgentStoreBuilder::new(20, 9).build();
        let (b, _) = AgentStoreBuilder::new(20, 9).build();
        let (c, _) = AgentStoreBuilder::new(20, 10).build();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn respawn_keeps_ids_and_rerolls() {
        let params = WorldParams::default();
        let (mut store, mut rngs) = AgentStoreBuilder::new(6, 3).build();
        let before = store.clone();
        store.respawn_all(&mut rngs, &params);
        assert_eq!(store.agent_ids().collect::<Vec<_>>(), before.agent_ids().collect::<Vec<_>>());
        assert_ne!(store, before);
    }

    #[test]
    fn custom_world_params_respected() {
        let params = WorldParams {
            plane_radius: 5.0,
            min_height: 2.0,
            spawn_height: 3.0,
            ..WorldParams::default()
        };
        let (store, _) = AgentStoreBuilder::new(50, 4).world(params).build();
        for a in store.iter() {
            assert!(a.position.x.abs() <= 5.0);
            assert!((2.0..=3.0).contains(&a.position.z));
        }
    }
}
