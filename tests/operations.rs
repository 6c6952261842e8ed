use menagerie::{
    components::Climate,
    engine::EngineSettings,
    session::DEFAULT_SESSION_DAYS,
    EnclosureId, ErrorCategory, Rules, Session, SessionStatus, ZooError,
};

fn settings(seed: u64) -> EngineSettings {
    EngineSettings {
        seed: Some(seed),
        ..EngineSettings::default()
    }
}

fn quiet_rules() -> Rules {
    Rules {
        event_chance_percent: 0,
        ..Rules::default()
    }
}

fn open(money: i64, rules: Rules, seed: u64) -> Session {
    Session::start("Test Park", money, "Ada", rules, settings(seed), DEFAULT_SESSION_DAYS)
        .expect("session starts")
}

/// One empty enclosure per climate, so every market animal has somewhere to go.
fn build_one_of_each(session: &mut Session) -> Vec<EnclosureId> {
    Climate::ALL
        .iter()
        .map(|climate| session.build_enclosure(*climate, 10).expect("affordable"))
        .collect()
}

fn pen_for(session: &Session, pens: &[EnclosureId], climate: Climate) -> EnclosureId {
    *pens
        .iter()
        .find(|id| session.zoo().enclosure(**id).map(|pen| pen.climate()) == Some(climate))
        .expect("pen exists")
}

#[test]
fn building_without_funds_is_rejected() {
    let mut session = open(50, Rules::default(), 1);
    let err = session.build_enclosure(Climate::Forest, 10).unwrap_err();
    assert_eq!(
        err,
        ZooError::InsufficientFunds {
            needed: 200,
            available: 50
        }
    );
    assert_eq!(err.category(), ErrorCategory::Resource);
    assert_eq!(session.zoo().money(), 50);
    assert!(session.zoo().enclosures().is_empty());
}

#[test]
fn one_purchase_per_day_after_day_ten() {
    let mut session = open(100_000, quiet_rules(), 3);
    let pens = build_one_of_each(&mut session);
    for _ in 0..10 {
        session.advance_day().expect("day resolves");
    }
    assert_eq!(session.zoo().day(), 11);

    let climate = session.zoo().market().get(0).expect("offer").climate;
    session
        .buy_animal(0, "First", pen_for(&session, &pens, climate))
        .expect("first purchase of the day");
    assert_eq!(session.zoo().animals_bought_today(), 1);

    let climate = session.zoo().market().get(0).expect("offer").climate;
    let money = session.zoo().money();
    assert_eq!(
        session.buy_animal(0, "Second", pen_for(&session, &pens, climate)),
        Err(ZooError::DailyLimitReached)
    );
    assert_eq!(session.zoo().money(), money);

    session.advance_day().expect("day resolves");
    assert_eq!(session.zoo().animals_bought_today(), 0);
}

#[test]
fn unlimited_purchases_during_free_days() {
    let mut session = open(100_000, quiet_rules(), 4);
    let pens = build_one_of_each(&mut session);
    let mut bought = 0;
    for _ in 0..3 {
        let climate = session.zoo().market().get(0).expect("offer").climate;
        let pen = pen_for(&session, &pens, climate);
        if let Some(index) = session.zoo().first_compatible_offer(pen) {
            session.buy_animal(index, "Guest", pen).expect("purchase");
            bought += 1;
        }
    }
    assert!(bought >= 1);
    assert_eq!(session.zoo().animals_bought_today(), bought);
    assert_eq!(session.zoo().total_animals(), bought as usize);
}

#[test]
fn market_refresh_is_paid_after_free_days() {
    let rules = Rules {
        free_market_days: 1,
        ..quiet_rules()
    };
    let mut session = open(140, rules, 5);
    session.refresh_market().expect("free refresh");
    assert_eq!(session.zoo().money(), 140);

    session.advance_day().expect("day resolves");
    assert_eq!(session.zoo().money(), 90);
    let pool = session.zoo().market().animals().to_vec();
    assert_eq!(
        session.refresh_market(),
        Err(ZooError::InsufficientFunds {
            needed: 150,
            available: 90
        })
    );
    assert_eq!(session.zoo().market().animals(), pool.as_slice());
    assert_eq!(session.zoo().money(), 90);
}

#[test]
fn staff_rules() {
    let mut session = open(1_000, Rules::default(), 6);
    let cleaner = session.hire_employee("Cal", "Cleaner").expect("hire");
    assert_eq!(cleaner.max_animals, 20);
    assert_eq!(session.zoo().money(), 920);

    let err = session.hire_employee("Rex", "dragon tamer").unwrap_err();
    assert_eq!(err, ZooError::UnknownRole("dragon tamer".to_string()));
    assert_eq!(err.category(), ErrorCategory::Validation);

    assert_eq!(session.fire_employee(0), Err(ZooError::ProtectedRole));
    assert_eq!(session.fire_employee(3), Err(ZooError::InvalidIndex(3)));
    assert_eq!(session.fire_employee(1).map(|e| e.name), Ok("Cal".to_string()));
    assert_eq!(session.zoo().employees().len(), 1);
}

#[test]
fn upgrade_doubles_capacity_up_to_level_three() {
    let mut session = open(10_000, Rules::default(), 7);
    let pen = session.build_enclosure(Climate::Ocean, 4).expect("built");
    assert_eq!(session.upgrade_enclosure(pen), Ok(2));
    assert_eq!(session.upgrade_enclosure(pen), Ok(3));
    assert_eq!(session.upgrade_enclosure(pen), Err(ZooError::MaxLevelReached));
    assert_eq!(session.zoo().enclosure(pen).map(|e| e.capacity()), Some(16));
    assert_eq!(
        session.upgrade_enclosure(EnclosureId(5)),
        Err(ZooError::NoSuchEnclosure(EnclosureId(5)))
    );
}

#[test]
fn advance_day_ages_every_survivor_by_one() {
    let mut session = open(100_000, quiet_rules(), 8);
    let pens = build_one_of_each(&mut session);
    for (n, pen) in pens.iter().enumerate() {
        if let Some(index) = session.zoo().first_compatible_offer(*pen) {
            session
                .buy_animal(index, &format!("Resident {n}"), *pen)
                .expect("purchase");
        }
    }
    session.buy_food(100).expect("food");
    let before: Vec<(String, u32)> = session
        .zoo()
        .animals()
        .map(|animal| (animal.name.clone(), animal.age_days))
        .collect();

    session.advance_day().expect("day resolves");

    for animal in session.zoo().animals() {
        let (_, age) = before
            .iter()
            .find(|(name, _)| *name == animal.name)
            .expect("animal existed yesterday");
        assert_eq!(animal.age_days, age + 1);
    }
}

#[test]
fn bankruptcy_ends_the_session() {
    let mut session = open(0, quiet_rules(), 9);
    let report = session.advance_day().expect("day resolves");
    assert!(report.bankrupt);
    assert_eq!(session.status(), SessionStatus::Bankrupt { day: 1 });

    assert_eq!(
        session.build_enclosure(Climate::Desert, 5),
        Err(ZooError::SessionOver)
    );
    let err = session.advance_day().unwrap_err();
    assert_eq!(err.downcast_ref::<ZooError>(), Some(&ZooError::SessionOver));
    assert_eq!(session.zoo().day(), 2);
}

#[test]
fn unwritable_snapshots_do_not_hide_the_end_of_a_session() {
    let blocker = tempfile::NamedTempFile::new().expect("temp file");
    let unwritable = |seed| EngineSettings {
        seed: Some(seed),
        snapshot_interval_days: 1,
        snapshot_dir: blocker.path().to_path_buf(),
    };

    let mut broke = Session::start("Broke Park", 0, "Ada", quiet_rules(), unwritable(9), 30)
        .expect("session starts");
    let report = broke.advance_day().expect("day resolves");
    assert!(report.bankrupt);
    assert_eq!(broke.status(), SessionStatus::Bankrupt { day: 1 });
    let err = broke.advance_day().unwrap_err();
    assert_eq!(err.downcast_ref::<ZooError>(), Some(&ZooError::SessionOver));
    assert_eq!(broke.zoo().day(), 2);

    let mut short = Session::start("Short Park", 10_000, "Ada", quiet_rules(), unwritable(10), 2)
        .expect("session starts");
    short.advance_day().expect("day resolves");
    short.advance_day().expect("day resolves");
    assert_eq!(short.status(), SessionStatus::Completed);
}

#[test]
fn session_completes_after_its_length() {
    let mut session = Session::start("Short Park", 10_000, "Ada", quiet_rules(), settings(10), 3)
        .expect("session starts");
    for _ in 0..2 {
        session.advance_day().expect("day resolves");
        assert_eq!(session.status(), SessionStatus::Active);
    }
    session.advance_day().expect("day resolves");
    assert_eq!(session.status(), SessionStatus::Completed);
    assert_eq!(session.cure_animal("anyone"), Err(ZooError::SessionOver));
}

#[test]
fn rejected_operations_leave_state_alone() {
    let mut session = open(300, Rules::default(), 12);
    assert_eq!(session.buy_food(-3), Err(ZooError::InvalidAmount(-3)));
    assert_eq!(session.run_advertising(0), Err(ZooError::InvalidAmount(0)));
    assert_eq!(
        session.sell_animal(EnclosureId(0), 0),
        Err(ZooError::NotFound)
    );
    assert_eq!(
        session.rename_animal(EnclosureId(0), 0, "Ghost"),
        Err(ZooError::NotFound)
    );
    assert_eq!(session.cure_animal("Ghost"), Err(ZooError::NotFound));
    assert_eq!(
        session.breed_in_enclosure(EnclosureId(0), 0, 1, &[]),
        Err(ZooError::NoSuchEnclosure(EnclosureId(0)))
    );
    assert_eq!(session.zoo().money(), 300);
    assert_eq!(session.zoo().popularity(), 50);
}
