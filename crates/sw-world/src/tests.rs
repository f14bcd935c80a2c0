//! Unit tests for sw-world.

#[cfg(test)]
mod nearest {
    use sw_core::{StationId, Vec3};

    use crate::{World, WorldBuilder};

    fn two_stations() -> World {
        let mut b = WorldBuilder::new();
        b.add_station(10.0, 0.0, 40.0, 5);
        b.add_station(-30.0, 0.0, 40.0, 5);
        b.build().unwrap()
    }

    #[test]
    fn empty_world_has_no_nearest() {
        assert!(World::empty().nearest_station(Vec3::ZERO).is_none());
        assert!(!World::empty().has_stations());
    }

    #[test]
    fn picks_closest_station() {
        let world = two_stations();
        let (s, d) = world.nearest_station(Vec3::new(-20.0, 0.0, 5.0)).unwrap();
        assert_eq!(s.id, StationId(1));
        assert!((d - 10.0).abs() < 1e-12);
    }

    #[test]
    fn distance_is_planar() {
        let world = two_stations();
        // High above station 0; height must not count.
        let (s, d) = world.nearest_station(Vec3::new(10.0, 0.0, 19.0)).unwrap();
        assert_eq!(s.id, StationId(0));
        assert!(d.abs() < 1e-12);
    }

    #[test]
    fn ties_go_to_first_inserted() {
        let mut b = WorldBuilder::new();
        b.add_station(5.0, 0.0, 40.0, 5);
        b.add_station(-5.0, 0.0, 40.0, 5);
        b.add_station(0.0, 5.0, 40.0, 5);
        let world = b.build().unwrap();
        let (s, _) = world.nearest_station(Vec3::ZERO).unwrap();
        assert_eq!(s.id, StationId(0));
    }

    #[test]
    fn lookup_by_id() {
        let world = two_stations();
        assert_eq!(world.station(StationId(1)).unwrap().position.x, -30.0);
        assert!(world.station(StationId(9)).is_none());
    }
}

#[cfg(test)]
mod builder {
    use sw_core::{ObstacleId, StationId, Vec3};

    use crate::{ChargingStation, Obstacle, ObstacleKind, WorldBuilder};

    #[test]
    fn sequential_ids_and_station_height() {
        let mut b = WorldBuilder::new().station_height(1.5);
        let a = b.add_station(0.0, 0.0, 30.0, 5);
        let c = b.add_station(1.0, 1.0, 30.0, 5);
        let o = b.add_obstacle(Vec3::new(0.0, 0.0, 2.0), 4.0, ObstacleKind::Dynamic);
        let world = b.build().unwrap();
        assert_eq!((a, c, o), (StationId(0), StationId(1), ObstacleId(0)));
        assert_eq!(world.stations[1].position.z, 1.5);
    }

    #[test]
    fn duplicate_station_ids_rejected() {
        let mut b = WorldBuilder::new();
        for _ in 0..2 {
            b.push_station(ChargingStation {
                id: StationId(3),
                position: Vec3::ZERO,
                charging_rate: 30.0,
                capacity: 4,
            });
        }
        assert!(b.build().is_err());
    }

    #[test]
    fn duplicate_obstacle_ids_rejected() {
        let mut b = WorldBuilder::new();
        for _ in 0..2 {
            b.push_obstacle(Obstacle {
                id: ObstacleId(1),
                position: Vec3::ZERO,
                size: 4.0,
                kind: ObstacleKind::Static,
            });
        }
        assert!(b.build().is_err());
    }

    #[test]
    fn non_positive_rate_rejected() {
        let mut b = WorldBuilder::new();
        b.add_station(0.0, 0.0, 0.0, 5);
        assert!(b.build().is_err());
    }

    #[test]
    fn non_positive_obstacle_size_rejected() {
        let mut b = WorldBuilder::new();
        b.push_obstacle(Obstacle {
            id: ObstacleId(0),
            position: Vec3::ZERO,
            size: -1.0,
            kind: ObstacleKind::Static,
        });
        assert!(b.build().is_err());
    }
}

#[cfg(test)]
mod generate {
    use sw_core::{SimRng, WorldParams};

    use crate::World;

    #[test]
    fn generated_world_within_bounds() {
        let params = WorldParams::default();
        let mut rng = SimRng::new(11);
        let world = World::generate(&mut rng, &params, 100);

        assert!((10..=25).contains(&world.obstacle_count()));
        assert_eq!(world.station_count(), 6); // 100 / 15 = 6
        for s in &world.stations {
            assert!(s.position.x.abs() <= params.plane_radius);
            assert!(s.position.y.abs() <= params.plane_radius);
            assert_eq!(s.position.z, params.station_height);
            assert!((30.0..=60.0).contains(&s.charging_rate));
            assert!((5..=12).contains(&s.capacity));
        }
        for o in &world.obstacles {
            assert!((3.0..=10.0).contains(&o.size));
        }
    }

    #[test]
    fn at_least_three_stations() {
        let mut rng = SimRng::new(1);
        let world = World::generate(&mut rng, &WorldParams::default(), 0);
        assert_eq!(world.station_count(), 3);
    }

    #[test]
    fn same_seed_same_world() {
        let params = WorldParams::default();
        let a = World::generate(&mut SimRng::new(5), &params, 50);
        let b = World::generate(&mut SimRng::new(5), &params, 50);
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use sw_core::{StationId, WorldParams};

    use crate::{ObstacleKind, WorldError, load_world, load_world_reader};

    const WORLD_JSON: &str = r#"{
        "stations": [
            { "id": 4, "x": -40.0, "y": 25.0, "charging_rate": 45.0, "capacity": 8 },
            { "id": 9, "x": 60.0,  "y": -10.0, "charging_rate": 35.0, "capacity": 6 }
        ],
        "obstacles": [
            { "id": 0, "x": 10.0, "y": -5.0, "z": 3.0, "size": 6.0, "type": "dynamic" },
            { "id": 1, "x": 0.0,  "y": 0.0,  "size": 2.0 }
        ]
    }"#;

    #[test]
    fn loads_from_reader() {
        let params = WorldParams { station_height: 0.5, ..WorldParams::default() };
        let world = load_world_reader(Cursor::new(WORLD_JSON), &params).unwrap();
        assert_eq!(world.station_count(), 2);
        assert_eq!(world.stations[0].id, StationId(4));
        assert_eq!(world.stations[1].position.z, 0.5);
        assert_eq!(world.obstacles[0].kind, ObstacleKind::Dynamic);
        assert_eq!(world.obstacles[1].kind, ObstacleKind::Static);
        assert_eq!(world.obstacles[1].position.z, 0.0);
    }

    #[test]
    fn missing_lists_are_empty() {
        let world = load_world_reader(Cursor::new("{}"), &WorldParams::default()).unwrap();
        assert_eq!(world.station_count(), 0);
        assert_eq!(world.obstacle_count(), 0);
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = load_world_reader(Cursor::new("{ \"stations\": ["), &WorldParams::default())
            .unwrap_err();
        assert!(matches!(err, WorldError::Json(_)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let json = r#"{ "stations": [ { "id": 0, "x": 0, "y": 0, "charging_rate": -1, "capacity": 1 } ] }"#;
        let err = load_world_reader(Cursor::new(json), &WorldParams::default()).unwrap_err();
        assert!(matches!(err, WorldError::Invalid(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        std::fs::write(&path, WORLD_JSON).unwrap();
        let world = load_world(&path, &WorldParams::default()).unwrap();
        assert_eq!(world.station_count(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_world(std::path::Path::new("/nonexistent/world.json"), &WorldParams::default())
            .unwrap_err();
        assert!(matches!(err, WorldError::Io(_)));
    }
}
