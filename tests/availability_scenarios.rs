//! End-to-end resolution scenarios over in-memory configuration snapshots

use chrono::{Duration, NaiveDate, NaiveTime};

use resto_availability::{
    calendar::Weekday,
    config::AvailabilityConfig,
    models::{
        Block, Closure, ClosureKind, ClosureScope, DayOverride, DaySource, OverrideStatus, Period,
        WeekdayRule, WeeklyRules,
    },
    AppError, AvailabilityEngine, ConfigSnapshot,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn summer() -> Period {
    Period {
        id: 1,
        name: "Summer".to_string(),
        start_date: date(2025, 7, 1),
        end_date: date(2025, 8, 31),
        priority: 0,
        active: true,
        rules: WeeklyRules::every_day(WeekdayRule::open(vec![Block::new(
            t(11, 30),
            t(22, 0),
            true,
        )])),
    }
}

fn inventory() -> Closure {
    Closure {
        id: 1,
        kind: ClosureKind::Recurring { month: 7, day: 15 },
        scope: ClosureScope::FullDay,
        reason: "Inventory".to_string(),
        is_holiday: false,
        active: true,
    }
}

fn short_opening() -> DayOverride {
    DayOverride {
        id: 1,
        date_from: date(2025, 7, 15),
        date_to: date(2025, 7, 15),
        priority: 100,
        note: "Lunch service only".to_string(),
        status: OverrideStatus::Open {
            open_from: t(12, 0),
            open_to: t(16, 0),
            last_reservation_time: Some(t(14, 30)),
        },
    }
}

fn engine(snapshot: &ConfigSnapshot) -> AvailabilityEngine<'_> {
    AvailabilityEngine::new(snapshot, &AvailabilityConfig::default())
}

#[test]
fn summer_period_opens_the_day() {
    let snapshot = ConfigSnapshot {
        periods: vec![summer()],
        ..Default::default()
    };

    let day = engine(&snapshot).effective_day(date(2025, 7, 15)).unwrap();
    assert!(day.is_open);
    assert_eq!(day.source, DaySource::Period);
    assert_eq!(day.blocks, vec![Block::new(t(11, 30), t(22, 0), true)]);
}

#[test]
fn recurring_closure_closes_the_day() {
    let snapshot = ConfigSnapshot {
        periods: vec![summer()],
        closures: vec![inventory()],
        ..Default::default()
    };

    let day = engine(&snapshot).effective_day(date(2025, 7, 15)).unwrap();
    assert!(!day.is_open);
    assert!(day.blocks.is_empty());
    assert_eq!(day.closure_reason.as_deref(), Some("Inventory"));
}

#[test]
fn override_reopens_closed_day_with_cutoff() {
    let snapshot = ConfigSnapshot {
        periods: vec![summer()],
        closures: vec![inventory()],
        overrides: vec![short_opening()],
    };
    let engine = engine(&snapshot);

    let day = engine.effective_day(date(2025, 7, 15)).unwrap();
    assert!(day.is_open);
    assert_eq!(day.source, DaySource::Override);
    assert_eq!(day.blocks, vec![Block::new(t(12, 0), t(16, 0), true)]);
    assert_eq!(day.last_reservation_time, Some(t(14, 30)));

    let slots = engine.reservable_slots(date(2025, 7, 15), 15).unwrap();
    let expected: Vec<NaiveTime> = (0..10).map(|i| t(12, 0) + Duration::minutes(15 * i)).collect();
    assert_eq!(slots.first(), Some(&t(12, 0)));
    assert_eq!(slots.last(), Some(&t(14, 15)));
    assert_eq!(slots, expected);
}

#[test]
fn highest_priority_override_wins() {
    let christmas_eve = date(2025, 12, 24);
    let snapshot = ConfigSnapshot {
        overrides: vec![
            DayOverride {
                id: 1,
                date_from: christmas_eve,
                date_to: christmas_eve,
                priority: 50,
                note: "Closed for staff party".to_string(),
                status: OverrideStatus::Closed,
            },
            DayOverride {
                id: 2,
                date_from: christmas_eve,
                date_to: christmas_eve,
                priority: 100,
                note: "Christmas Eve lunch".to_string(),
                status: OverrideStatus::Open {
                    open_from: t(12, 0),
                    open_to: t(15, 0),
                    last_reservation_time: None,
                },
            },
        ],
        ..Default::default()
    };

    let day = engine(&snapshot).effective_day(christmas_eve).unwrap();
    assert!(day.is_open);
    assert_eq!(day.blocks, vec![Block::new(t(12, 0), t(15, 0), true)]);
    assert!(day.notes.contains(&"Christmas Eve lunch".to_string()));
}

#[test]
fn unconfigured_dates_are_closed() {
    let snapshot = ConfigSnapshot::default();
    let engine = engine(&snapshot);

    for day in engine.effective_range(date(2025, 1, 1), date(2025, 12, 31)).unwrap().values() {
        assert!(!day.is_open, "{} should be closed", day.date);
        assert_eq!(day.source, DaySource::Default);
    }
}

#[test]
fn override_status_decides_regardless_of_other_layers() {
    let mut closed = short_opening();
    closed.status = OverrideStatus::Closed;
    let snapshot = ConfigSnapshot {
        periods: vec![summer()],
        overrides: vec![closed],
        ..Default::default()
    };

    let day = engine(&snapshot).effective_day(date(2025, 7, 15)).unwrap();
    assert!(!day.is_open);
    assert_eq!(day.source, DaySource::Override);
    assert_eq!(day.closure_reason.as_deref(), Some("Lunch service only"));
}

#[test]
fn higher_priority_period_supplies_the_rule() {
    let mut events = summer();
    events.id = 2;
    events.name = "Festival".to_string();
    events.priority = 10;
    events.start_date = date(2025, 7, 10);
    events.end_date = date(2025, 7, 20);
    events.rules = WeeklyRules::every_day(WeekdayRule::open(vec![Block::new(
        t(18, 0),
        t(0, 0),
        true,
    )]));
    *events.rules.rule_mut(Weekday::Sunday) = WeekdayRule::closed();

    let snapshot = ConfigSnapshot {
        periods: vec![summer(), events],
        ..Default::default()
    };
    let engine = engine(&snapshot);

    // Tuesday inside the festival
    let day = engine.effective_day(date(2025, 7, 15)).unwrap();
    assert_eq!(day.blocks, vec![Block::new(t(18, 0), t(0, 0), true)]);
    let slots = engine.reservable_slots(date(2025, 7, 15), 60).unwrap();
    assert_eq!(slots.last(), Some(&t(23, 0)));

    // Sunday inside the festival: the winning rule closes the day
    let day = engine.effective_day(date(2025, 7, 13)).unwrap();
    assert!(!day.is_open);

    // Outside the festival the summer rule applies again
    let day = engine.effective_day(date(2025, 7, 25)).unwrap();
    assert_eq!(day.blocks, vec![Block::new(t(11, 30), t(22, 0), true)]);
}

#[test]
fn resolution_is_idempotent_and_range_consistent() {
    let snapshot = ConfigSnapshot {
        periods: vec![summer()],
        closures: vec![inventory()],
        overrides: vec![short_opening()],
    };
    let engine = engine(&snapshot);
    let range = engine.effective_range(date(2025, 6, 25), date(2025, 9, 5)).unwrap();

    assert_eq!(range.len(), 73);
    for (date, day) in &range {
        let single = engine.effective_day(*date).unwrap();
        assert_eq!(&single, day);
        assert_eq!(engine.effective_day(*date).unwrap(), single);
        assert_eq!(engine.effective_range(*date, *date).unwrap()[date], single);
    }
}

#[test]
fn slots_respect_blocked_windows_and_cutoff() {
    let private_event = Closure {
        id: 2,
        kind: ClosureKind::Dated {
            start_date: date(2025, 8, 2),
            end_date: date(2025, 8, 2),
        },
        scope: ClosureScope::TimeRange {
            start_time: t(18, 0),
            end_time: t(20, 0),
        },
        reason: "Private event".to_string(),
        is_holiday: false,
        active: true,
    };
    let snapshot = ConfigSnapshot {
        periods: vec![summer()],
        closures: vec![private_event],
        ..Default::default()
    };
    let engine = engine(&snapshot);

    let day = engine.effective_day(date(2025, 8, 2)).unwrap();
    assert!(day.is_open);
    assert_eq!(day.source, DaySource::Closure);
    assert_eq!(day.blocked_windows.len(), 1);
    assert_eq!(day.notes, vec!["Private event".to_string()]);

    let slots = engine.reservable_slots(date(2025, 8, 2), 30).unwrap();
    assert!(slots.contains(&t(17, 30)));
    assert!(!slots.iter().any(|s| *s >= t(18, 0) && *s < t(20, 0)));
    assert!(slots.contains(&t(20, 0)));
    assert_eq!(slots.last(), Some(&t(21, 30)));
}

#[test]
fn invalid_record_fails_the_whole_range() {
    let mut broken = short_opening();
    broken.date_from = date(2025, 7, 20);
    broken.date_to = date(2025, 7, 20);
    broken.status = OverrideStatus::Open {
        open_from: t(16, 0),
        open_to: t(12, 0),
        last_reservation_time: None,
    };
    let snapshot = ConfigSnapshot {
        periods: vec![summer()],
        overrides: vec![broken],
        ..Default::default()
    };
    let engine = engine(&snapshot);

    let err = engine.effective_range(date(2025, 7, 1), date(2025, 7, 31)).unwrap_err();
    assert!(matches!(err, AppError::ConfigInvalid(_)));
    // Dates the broken override does not cover still resolve
    assert!(engine.effective_day(date(2025, 7, 19)).unwrap().is_open);
}

#[test]
fn range_limits_are_enforced() {
    let snapshot = ConfigSnapshot::default();
    let engine = engine(&snapshot);

    assert!(matches!(
        engine.effective_range(date(2025, 7, 2), date(2025, 7, 1)),
        Err(AppError::InvalidRange { .. })
    ));
    assert!(matches!(
        engine.effective_range(date(2025, 1, 1), date(2026, 1, 6)),
        Err(AppError::RangeTooLarge { max_days: 370, .. })
    ));
    assert_eq!(engine.effective_range(date(2025, 1, 1), date(2026, 1, 5)).unwrap().len(), 370);
}

#[test]
fn midnight_cutoff_keeps_late_opening_bookable() {
    let late_night = DayOverride {
        id: 4,
        date_from: date(2025, 12, 31),
        date_to: date(2025, 12, 31),
        priority: 100,
        note: "New Year's Eve".to_string(),
        status: OverrideStatus::Open {
            open_from: t(19, 0),
            open_to: NaiveTime::MIN,
            last_reservation_time: Some(NaiveTime::MIN),
        },
    };
    assert!(late_night.validate().is_ok());
    let snapshot = ConfigSnapshot {
        overrides: vec![late_night],
        ..Default::default()
    };
    let engine = engine(&snapshot);

    assert!(engine.effective_day(date(2025, 12, 31)).unwrap().is_open);
    let slots = engine.reservable_slots(date(2025, 12, 31), 60).unwrap();
    assert_eq!(slots.first(), Some(&t(19, 0)));
    assert_eq!(slots.last(), Some(&t(23, 0)));
}

#[test]
fn impossible_recurring_closure_does_not_fail_other_dates() {
    let typo = Closure {
        id: 9,
        kind: ClosureKind::Recurring { month: 4, day: 31 },
        scope: ClosureScope::FullDay,
        reason: "Spring cleaning".to_string(),
        is_holiday: false,
        active: true,
    };
    let snapshot = ConfigSnapshot {
        periods: vec![summer()],
        closures: vec![typo],
        ..Default::default()
    };
    let engine = engine(&snapshot);

    assert!(engine.effective_day(date(2025, 7, 15)).unwrap().is_open);
    let days = engine.effective_range(date(2025, 1, 1), date(2025, 12, 31)).unwrap();
    assert!(days.values().all(|day| day.source != DaySource::Closure));
}
