//! Store and navigator properties over generated action and navigation
//! sequences

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use libquitmath::store::{self, Action, RootState, Store};
use libquitmath::types::{CravingEntry, DailySession, DailyState, EcoRecord, TaskKind, TaskLog};
use libquitmath::{Navigator, ScreenId};

// -- Strategy helpers --

fn arb_datetime() -> impl Strategy<Value = DateTime<Utc>> {
    (1_704_067_200i64..1_735_689_600i64)
        .prop_map(|secs| Utc.timestamp_opt(secs, 0).single().expect("timestamp in range"))
}

fn arb_craving() -> impl Strategy<Value = CravingEntry> {
    (
        arb_datetime(),
        0u8..=10,
        proptest::option::of(0u8..=10),
        proptest::option::of("[a-z ]{0,12}"),
    )
        .prop_map(|(ts, score, attention, note)| {
            CravingEntry::at(ts, score, attention, note).expect("generated values are in range")
        })
}

fn arb_task_kind() -> impl Strategy<Value = TaskKind> {
    prop_oneof![
        Just(TaskKind::Math),
        Just(TaskKind::NBack),
        Just(TaskKind::Motor),
        Just(TaskKind::Breath),
    ]
}

fn arb_task_log() -> impl Strategy<Value = TaskLog> {
    (arb_task_kind(), 1u8..=10, any::<bool>(), arb_datetime(), "[a-f0-9]{8}").prop_map(
        |(kind, difficulty, success, started_at, id)| TaskLog {
            id,
            kind,
            difficulty,
            success,
            reward_delta: if success { 0.1 } else { 0.0 },
            started_at,
            completed_at: Some(started_at),
        },
    )
}

fn arb_session() -> impl Strategy<Value = DailySession> {
    (0u32..60, any::<bool>(), 0u32..30).prop_map(|(offset, smoked, streak)| DailySession {
        date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
            + chrono::Duration::days(i64::from(offset)),
        state: if smoked { DailyState::Smoking } else { DailyState::Withdrawal },
        avg_craving: 0.5,
        avg_attention: 0.5,
        avg_reward: 0.0,
        smoked_today: smoked,
        abstinent_streak: if smoked { 0 } else { streak },
    })
}

fn arb_eco_records() -> impl Strategy<Value = Vec<EcoRecord>> {
    prop::collection::vec(
        (prop_oneof![Just("DisposableVapesAvoided"), Just("CO2eAvoided")], 0.0f64..50.0),
        0..3,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(metric, value)| EcoRecord::new(metric, "units", value, value * 0.01))
            .collect()
    })
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        ("[a-z]{1,8}@[a-z]{1,6}\\.org", proptest::option::of("[a-f0-9]{16}"))
            .prop_map(|(user, token)| Action::Login { user, token }),
        "[A-Za-z ]{1,20}".prop_map(|error| Action::LoginFailed { error }),
        Just(Action::Logout),
        arb_craving().prop_map(|entry| Action::CravingLogged { entry }),
        Just(Action::CravingsCleared),
        arb_task_log().prop_map(|log| Action::TaskLogged { log }),
        prop::collection::vec(0u32..60, 0..4)
            .prop_map(|minute_offsets| Action::TasksSuggested { minute_offsets }),
        arb_session().prop_map(|session| Action::SessionRecorded { session }),
        arb_eco_records().prop_map(|records| Action::EcoRecorded { records }),
        (-5.0f64..40.0).prop_map(|units_per_day| Action::EcoBaselineSet { units_per_day }),
        Just(Action::Unrecognized),
    ]
}

fn arb_screen() -> impl Strategy<Value = ScreenId> {
    prop::sample::select(ScreenId::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum NavOp {
    Navigate(ScreenId),
    Back,
    Reset(ScreenId),
}

fn arb_nav_op() -> impl Strategy<Value = NavOp> {
    prop_oneof![
        3 => arb_screen().prop_map(NavOp::Navigate),
        2 => Just(NavOp::Back),
        1 => arb_screen().prop_map(NavOp::Reset),
    ]
}

proptest! {
    /// The root state after a sequence equals each slice reducer applied
    /// on its own, in the same order
    #[test]
    fn prop_replay_matches_independent_slices(actions in prop::collection::vec(arb_action(), 0..40)) {
        let mut store = Store::new();
        for action in &actions {
            store.dispatch(action.clone());
        }

        let mut auth = store::AuthState::default();
        let mut cravings = store::CravingsState::default();
        let mut tasks = store::TasksState::default();
        let mut sessions = store::SessionsState::default();
        let mut eco = store::EcoState::default();
        for action in &actions {
            auth = store::auth::reduce(auth, action);
            cravings = store::cravings::reduce(cravings, action);
            tasks = store::tasks::reduce(tasks, action);
            sessions = store::sessions::reduce(sessions, action);
            eco = store::eco::reduce(eco, action);
        }

        let expected = RootState { auth, cravings, tasks, sessions, eco };
        prop_assert_eq!(store.get_state(), &expected);
        prop_assert_eq!(store.dispatch_count(), actions.len() as u64);
    }

    /// An unrecognized action never changes any slice
    #[test]
    fn prop_unrecognized_is_a_no_op(actions in prop::collection::vec(arb_action(), 0..20)) {
        let mut store = Store::new();
        for action in actions {
            store.dispatch(action);
        }
        let before = store.get_state().clone();

        store.dispatch(Action::Unrecognized);
        prop_assert_eq!(store.get_state(), &before);
    }

    /// An action only ever changes the slice it is addressed to
    #[test]
    fn prop_actions_touch_only_their_slice(
        setup in prop::collection::vec(arb_action(), 0..20),
        action in arb_action(),
    ) {
        let mut state = RootState::default();
        for a in &setup {
            state = store::reduce(state, a);
        }
        let after = store::reduce(state.clone(), &action);

        let owner = action.slice().map(|s| s.as_str());
        if owner != Some("auth") { prop_assert_eq!(&after.auth, &state.auth); }
        if owner != Some("cravings") { prop_assert_eq!(&after.cravings, &state.cravings); }
        if owner != Some("tasks") { prop_assert_eq!(&after.tasks, &state.tasks); }
        if owner != Some("sessions") { prop_assert_eq!(&after.sessions, &state.sessions); }
        if owner != Some("eco") { prop_assert_eq!(&after.eco, &state.eco); }
    }

    /// navigate(X) followed by go_back() restores the previous top
    #[test]
    fn prop_navigate_then_back_restores_top(
        ops in prop::collection::vec(arb_nav_op(), 0..30),
        target in arb_screen(),
    ) {
        let mut nav = Navigator::starting_at(ScreenId::Onboarding);
        for op in ops {
            match op {
                NavOp::Navigate(s) => nav.navigate(s),
                NavOp::Back => { nav.go_back(); }
                NavOp::Reset(s) => nav.reset(s),
            }
        }

        let before = nav.clone();
        nav.navigate(target);
        prop_assert_eq!(nav.current().screen, target);
        prop_assert_eq!(nav.depth(), before.depth() + 1);

        prop_assert!(nav.go_back());
        prop_assert_eq!(nav, before);
    }

    /// The stack is never empty and back at the root does nothing
    #[test]
    fn prop_back_at_root_is_a_no_op(root in arb_screen(), extra_backs in 1usize..5) {
        let mut nav = Navigator::starting_at(root);
        for _ in 0..extra_backs {
            prop_assert!(!nav.go_back());
        }
        prop_assert_eq!(nav.depth(), 1);
        prop_assert_eq!(nav.current().screen, root);
    }
}
