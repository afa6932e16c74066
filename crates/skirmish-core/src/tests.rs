#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::commands::{HeroSelection, PlayerCommand};
    use crate::constants::*;
    use crate::defs::*;
    use crate::enums::*;
    use crate::error::Rejection;
    use crate::events::{GameEvent, KillInfo};
    use crate::state::{HordeSnapshot, RunOutcome};
    use crate::types::{angular_deviation, Bounds, SimTime, Tile};

    #[test]
    fn test_weapon_kind_serde() {
        for v in WeaponKind::ALL {
            let json = serde_json::to_string(&v).unwrap();
            let back: WeaponKind = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_upgrade_id_serde_and_key() {
        let ids = vec![
            UpgradeId::weapon(WeaponKind::Pistol, 2),
            UpgradeId::Area(1),
            UpgradeId::Damage(3),
        ];
        for id in &ids {
            let json = serde_json::to_string(id).unwrap();
            let back: UpgradeId = serde_json::from_str(&json).unwrap();
            assert_eq!(*id, back);
        }
        assert_eq!(ids[0].key(), "pistol_mk2");
        assert_eq!(ids[1].to_string(), "area_1");
    }

    #[test]
    fn test_weapon_kind_parse_matches_as_str() {
        for v in WeaponKind::ALL {
            assert_eq!(WeaponKind::parse(v.as_str()), Some(v));
        }
        assert_eq!(WeaponKind::parse("laser"), None);
    }

    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Pause,
            PlayerCommand::Resume,
            PlayerCommand::SetTimeScale { scale: 2.0 },
            PlayerCommand::ChooseUpgrade {
                id: UpgradeId::weapon(WeaponKind::Bomb, 1),
            },
            PlayerCommand::PlaceTower {
                kind: TowerKind::Freezer,
                tile: Tile::new(3, 4),
            },
            PlayerCommand::UpgradeTower { tower_id: 7 },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::WaveAdvanced { wave_index: 2 },
            GameEvent::EntityKilled(KillInfo {
                id: 9,
                kind: MobKind::Brute,
                position: Vec2::new(1.0, 2.0),
                xp: 8,
                coins: 12,
                source: DamageSource::Weapon(WeaponKind::Sword),
            }),
            GameEvent::RunEnded(RunOutcome::default()),
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = HordeSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: HordeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
    }

    #[test]
    fn test_rejection_messages() {
        let r = Rejection::InsufficientFunds { have: 10, need: 50 };
        assert_eq!(r.to_string(), "insufficient coins: have 10, need 50");
        let r = Rejection::OnRoad(Tile::new(2, 3));
        assert_eq!(r.to_string(), "tile (2, 3) is part of the road");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        for _ in 0..TICK_RATE {
            t.advance(DT);
        }
        assert_eq!(t.tick, TICK_RATE as u64);
        assert!((t.now() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_edge_offset_wraps() {
        assert_eq!(Edge::Left.offset(1), Edge::Top);
        assert_eq!(Edge::Bottom.offset(3), Edge::Right);
        assert_eq!(Edge::Top.offset(4), Edge::Top);
    }

    #[test]
    fn test_bounds_contains_inclusive() {
        let b = Bounds::centered(Vec2::ZERO, Vec2::new(10.0, 5.0));
        assert!(b.contains(Vec2::new(10.0, 5.0)));
        assert!(!b.contains(Vec2::new(10.1, 0.0)));
        assert!(b.expanded(1.0).contains(Vec2::new(10.5, 0.0)));
    }

    #[test]
    fn test_angular_deviation() {
        let facing = Vec2::X;
        assert!(angular_deviation(facing, Vec2::new(5.0, 0.0)).abs() < 1e-6);
        let right_angle = angular_deviation(facing, Vec2::new(0.0, 3.0));
        assert!((right_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(angular_deviation(facing, Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_weapon_tiers_are_one_based() {
        for weapon in WeaponKind::ALL {
            assert!(WeaponStats::tier(weapon, 0).is_none());
            for tier in 1..=WEAPON_TIERS {
                let stats = WeaponStats::tier(weapon, tier).unwrap();
                assert!(stats.cooldown >= MIN_COOLDOWN_SECS);
            }
            assert!(WeaponStats::tier(weapon, WEAPON_TIERS + 1).is_none());
        }
    }

    #[test]
    fn test_scaled_leaves_template_untouched() {
        let base = WeaponStats::tier(WeaponKind::Aura, 1).unwrap();
        let scaled = base.scaled(2.0, 1.5);
        assert_eq!(scaled.damage, base.damage * 2.0);
        assert_eq!(scaled.area, base.area * 1.5);
        assert_eq!(scaled.cooldown, base.cooldown);
        assert_eq!(WeaponStats::tier(WeaponKind::Aura, 1).unwrap(), base);
    }

    #[test]
    fn test_tower_levels_have_three_entries() {
        for kind in TowerKind::ALL {
            assert_eq!(kind.levels().len(), 3);
            assert_eq!(kind.placement_cost(), kind.levels()[0].cost);
        }
    }

    #[test]
    fn test_hero_selection_resolves_weapon() {
        assert_eq!(
            HeroSelection::new(HeroKind::Knight).resolved_weapon(),
            Some(WeaponKind::Sword)
        );
        assert_eq!(HeroSelection::new(HeroKind::Ranger).resolved_weapon(), None);
        assert_eq!(
            HeroSelection::with_weapon(HeroKind::Ranger, WeaponKind::Pistol).resolved_weapon(),
            Some(WeaponKind::Pistol)
        );
    }
}
