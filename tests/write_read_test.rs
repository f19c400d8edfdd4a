mod helpers;

use scribe::store::types::{NewSession, OptimizedNote, Session};
use scribe::store::{notes, optimized, sessions, settings};

#[test]
fn sessions_list_newest_first() {
    let conn = helpers::test_db();
    for (id, created_at) in [("old", 1_000), ("new", 3_000), ("mid", 2_000)] {
        sessions::add_session(
            &conn,
            &Session {
                id: id.into(),
                date: "2024-06-01".into(),
                patient_name: "Avery".into(),
                title: None,
                created_at,
            },
        )
        .unwrap();
    }

    let ids: Vec<String> = sessions::get_sessions(&conn)
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[test]
fn duplicate_session_id_is_rejected() {
    let conn = helpers::test_db();
    let session = helpers::insert_session(&conn, "Avery");
    assert!(sessions::add_session(&conn, &session).is_err());
}

#[test]
fn create_session_rejects_blank_name_and_bad_date() {
    let conn = helpers::test_db();
    let blank = NewSession {
        date: "2024-06-01".into(),
        patient_name: "   ".into(),
        title: None,
    };
    assert!(sessions::create_session(&conn, &blank).is_err());

    let bad_date = NewSession {
        date: "06/01/2024".into(),
        patient_name: "Avery".into(),
        title: None,
    };
    assert!(sessions::create_session(&conn, &bad_date).is_err());
    assert!(sessions::get_sessions(&conn).unwrap().is_empty());
}

#[test]
fn notes_are_scoped_to_their_session_in_time_order() {
    let conn = helpers::test_db();
    let a = helpers::insert_session(&conn, "Avery");
    let b = helpers::insert_session(&conn, "Blake");
    helpers::insert_note(&conn, &a.id, "a2", "second", 20);
    helpers::insert_note(&conn, &b.id, "b1", "other", 5);
    helpers::insert_note(&conn, &a.id, "a1", "first", 10);

    let texts: Vec<String> = notes::get_notes(&conn, &a.id)
        .unwrap()
        .into_iter()
        .map(|n| n.text)
        .collect();
    assert_eq!(texts, vec!["first", "second"]);
    assert_eq!(
        notes::join_note_texts(&notes::get_notes(&conn, &a.id).unwrap()),
        "first\nsecond"
    );
}

#[test]
fn deleting_a_session_keeps_its_notes() {
    let conn = helpers::test_db();
    let session = helpers::insert_session(&conn, "Avery");
    helpers::insert_note(&conn, &session.id, "n1", "still here", 1);

    assert!(sessions::delete_session(&conn, &session.id).unwrap());
    assert!(sessions::get_session(&conn, &session.id).unwrap().is_none());
    assert_eq!(notes::get_notes(&conn, &session.id).unwrap().len(), 1);
}

#[test]
fn reoptimizing_overwrites_in_place() {
    let mut conn = helpers::test_db();
    let session = helpers::insert_session(&conn, "Avery");

    let first = optimized::save_optimized_note(
        &mut conn,
        &OptimizedNote {
            id: "opt-1".into(),
            session_id: session.id.clone(),
            content: "first summary".into(),
            timestamp: 100,
        },
    )
    .unwrap();
    let second = optimized::save_optimized_note(
        &mut conn,
        &OptimizedNote {
            id: "opt-2".into(),
            session_id: session.id.clone(),
            content: "second summary".into(),
            timestamp: 200,
        },
    )
    .unwrap();

    assert_eq!(first.id, "opt-1");
    assert_eq!(second.id, "opt-1");
    let stored = optimized::get_optimized_note(&conn, &session.id).unwrap().unwrap();
    assert_eq!(stored.content, "second summary");
    assert_eq!(stored.timestamp, 200);
    assert_eq!(optimized::get_all_optimized_notes(&conn).unwrap().len(), 1);
}

#[test]
fn settings_singleton_round_trip() {
    let conn = helpers::test_db();
    assert!(settings::get_settings(&conn).unwrap().is_none());
    assert!(settings::api_key(&conn).unwrap().is_none());

    helpers::store_api_key(&conn, "sk-first");
    helpers::store_api_key(&conn, "sk-second");

    let stored = settings::get_settings(&conn).unwrap().unwrap();
    assert_eq!(stored.id, "default");
    assert_eq!(stored.openai_api_key.as_deref(), Some("sk-second"));

    helpers::store_api_key(&conn, "");
    assert!(settings::api_key(&conn).unwrap().is_none());
}
