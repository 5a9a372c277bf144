//! Integration tests for the client book: form state, save reconciliation
//! and store interaction.


use std::collections::BTreeMap;

use client_book::{
    Candidate, ClientError, ClientRecord, ClientStore, EditState, FieldName, FieldStatus,
    KeyCandidate, Marker, NoticeKind, RecordId, RowAction, SaveOutcome, StoreError, WriteOp,
};
use support::{ann, book, book_with, fill, probe, ProbeStore};

#[test]
fn submit_new_record_inserts_without_key() {
    let mut book = book();
    let renders_before = book.view().renders();

    fill(&mut book, "Ann Lee", "ann@x.com", "555-123-4567");
    assert!(book.view().submit_enabled());

    let outcome = book.submit().unwrap();
    assert_eq!(outcome, SaveOutcome::Inserted(RecordId::new(1)));

    let applied = probe(&book).applied();
    assert_eq!(applied.len(), 1);
    assert_eq!(
        applied[0],
        vec![WriteOp::Insert {
            record: ann(),
            key: KeyCandidate::Absent
        }]
    );

    assert_eq!(book.view().renders(), renders_before + 1);
    assert_eq!(book.view().rows().len(), 1);
    for field in book.form().fields() {
        assert_eq!(field.status(), FieldStatus::Untouched);
        assert_eq!(field.value(), "");
    }
    assert!(!book.view().submit_enabled());
    assert!(!book.form().edit_state().is_editing());

    let notice = book.view().last_notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert!(notice.clear_after.is_some());
}

#[test]
fn load_for_edit_then_submit_upserts_same_id() {
    let store = ProbeStore::new();
    store.seed(7, ann());
    let mut book = book_with(store);

    assert!(book.load_for_edit(RecordId::new(7)).unwrap());
    assert_eq!(book.form().edit_state().editing_id(), Some(7.0));
    assert!(book.view().submit_enabled());

    book.input(FieldName::Phone, "555-000-1111");
    let outcome = book.submit().unwrap();
    assert_eq!(outcome, SaveOutcome::Updated(RecordId::new(7)));

    let applied = probe(&book).applied();
    assert_eq!(applied.len(), 1);
    match &applied[0][..] {
        [WriteOp::Upsert(record)] => {
            assert_eq!(record.id, Some(RecordId::new(7)));
            assert_eq!(record.phone, "555-000-1111");
        }
        other => panic!("expected a single upsert, got {:?}", other),
    }

    let all = probe(&book).get_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, Some(RecordId::new(7)));
    assert!(!book.form().edit_state().is_editing());
}

#[test]
fn edit_mode_reveals_invalid_stored_phone() {
    let store = ProbeStore::new();
    store.seed(3, ClientRecord::new("Ann Lee", "ann@x.com", "12"));
    let mut book = book_with(store);

    book.load_for_edit(RecordId::new(3)).unwrap();

    let phone = book.form().field(FieldName::Phone);
    assert_eq!(phone.status(), FieldStatus::TouchedInvalid);
    assert_eq!(book.form().marker(FieldName::Phone), Marker::Invalid);
    assert_eq!(book.form().marker(FieldName::Name), Marker::Valid);
    assert!(!book.view().submit_enabled());
}

#[test]
fn structured_insert_key_never_reaches_store() {
    let mut book = book();
    fill(&mut book, "Ann Lee", "ann@x.com", "555-123-4567");

    let mut key = BTreeMap::new();
    key.insert("nested".to_string(), KeyCandidate::Number(1.0));
    let candidate = Candidate::from_form(book.form()).with_key(KeyCandidate::Object(key));

    let err = book.submit_candidate(candidate).unwrap_err();
    assert!(matches!(err, ClientError::InvalidInsertKey { .. }));
    assert!(probe(&book).applied().is_empty());
    assert_eq!(book.view().last_notice().unwrap().kind, NoticeKind::Error);
    // The form keeps what the user typed.
    assert_eq!(book.form().field(FieldName::Name).value(), "Ann Lee");
}

#[test]
fn blank_insert_key_is_dropped() {
    let mut book = book();
    fill(&mut book, "Ann Lee", "ann@x.com", "555-123-4567");

    let candidate =
        Candidate::from_form(book.form()).with_key(KeyCandidate::Text(String::new()));
    assert_eq!(
        book.submit_candidate(candidate).unwrap(),
        SaveOutcome::Inserted(RecordId::new(1))
    );
    assert!(matches!(
        &probe(&book).applied()[0][..],
        [WriteOp::Insert {
            key: KeyCandidate::Absent,
            ..
        }]
    ));
}

#[test]
fn nan_edit_id_never_reaches_store() {
    let mut book = book();
    fill(&mut book, "Ann Lee", "ann@x.com", "555-123-4567");
    book.form_mut().set_edit_state(EditState::from_raw(f64::NAN));

    let err = book.submit().unwrap_err();
    assert!(matches!(err, ClientError::InvalidEditKey { raw } if raw.is_nan()));
    assert!(probe(&book).applied().is_empty());
}

#[test]
fn unparseable_edit_attribute_never_reaches_store() {
    let mut book = book();
    fill(&mut book, "Ann Lee", "ann@x.com", "555-123-4567");
    book.form_mut().set_edit_state(EditState::from_attribute("abc"));

    assert!(matches!(
        book.submit(),
        Err(ClientError::InvalidEditKey { .. })
    ));
    assert!(probe(&book).applied().is_empty());
}

#[test]
fn duplicate_email_keeps_form_for_correction() {
    let store = ProbeStore::new();
    store.seed(1, ann());
    let mut book = book_with(store);
    let renders_before = book.view().renders();

    fill(&mut book, "Annie Lee", "ann@x.com", "555-222-3333");
    let err = book.submit().unwrap_err();
    assert_eq!(
        err,
        ClientError::TransactionFailure(StoreError::ConstraintViolation {
            index: "email".into(),
            value: "ann@x.com".into(),
        })
    );

    assert_eq!(book.view().last_notice().unwrap().kind, NoticeKind::Error);
    assert_eq!(book.view().renders(), renders_before);
    assert_eq!(book.form().field(FieldName::Name).value(), "Annie Lee");
    assert_eq!(
        book.form().field(FieldName::Email).status(),
        FieldStatus::TouchedValid
    );
    assert!(book.view().submit_enabled());

    // Correcting the email and retrying succeeds.
    book.input(FieldName::Email, "annie@x.com");
    assert_eq!(
        book.submit().unwrap(),
        SaveOutcome::Inserted(RecordId::new(2))
    );
}

#[test]
fn failed_update_keeps_edit_state() {
    let store = ProbeStore::new();
    store.seed(4, ann());
    let mut book = book_with(store);

    book.load_for_edit(RecordId::new(4)).unwrap();
    probe(&book).fail_writes(true);

    let err = book.submit().unwrap_err();
    assert!(matches!(err, ClientError::TransactionFailure(_)));
    assert_eq!(book.form().edit_state().editing_id(), Some(4.0));

    probe(&book).fail_writes(false);
    assert_eq!(
        book.submit().unwrap(),
        SaveOutcome::Updated(RecordId::new(4))
    );
}

#[test]
fn edit_near_max_key_keeps_its_id() {
    let max = RecordId::MAX.get();
    let store = ProbeStore::new();
    store.seed(max - 1, ann());
    let mut book = book_with(store);

    fill(&mut book, "Bob Ray", "bob@x.com", "555-987-6543");
    let id = RecordId::MAX;
    assert_eq!(book.submit().unwrap(), SaveOutcome::Inserted(id));

    assert!(book.load_for_edit(id).unwrap());
    book.input(FieldName::Email, "bob.ray@x.com");
    assert_eq!(book.submit().unwrap(), SaveOutcome::Updated(id));

    let store = probe(&book).inner();
    assert_eq!(store.get(id).unwrap().unwrap().email, "bob.ray@x.com");
    assert_eq!(
        store.get(RecordId::new(max - 1)).unwrap().unwrap(),
        ann().with_id(RecordId::new(max - 1))
    );
}

#[test]
fn exhausted_key_generator_fails_insert() {
    let store = ProbeStore::new();
    store.seed(RecordId::MAX.get(), ann());
    let mut book = book_with(store);

    fill(&mut book, "Bob Ray", "bob@x.com", "555-987-6543");
    let err = book.submit().unwrap_err();
    assert!(matches!(err, ClientError::TransactionFailure(StoreError::Storage(_))));
    assert_eq!(probe(&book).inner().get_all().unwrap().len(), 1);
    assert_eq!(book.form().field(FieldName::Name).value(), "Bob Ray");
}

#[test]
fn invalid_form_never_reaches_store() {
    let mut book = book();
    assert!(!book.view().submit_enabled());

    let err = book.submit().unwrap_err();
    assert_eq!(
        err,
        ClientError::InvalidForm {
            fields: FieldName::ALL.to_vec()
        }
    );
    assert!(probe(&book).applied().is_empty());
    assert!(probe(&book).inner().get_all().unwrap().is_empty());
    assert_eq!(book.view().last_notice().unwrap().kind, NoticeKind::Error);
    // The rejected fields now show as invalid.
    for field in FieldName::ALL {
        assert_eq!(book.form().marker(field), Marker::Invalid);
    }

    fill(&mut book, "Ann Lee", "ann@x.com", "555-123");
    assert!(matches!(
        book.submit(),
        Err(ClientError::InvalidForm { fields }) if fields == vec![FieldName::Phone]
    ));
    assert!(probe(&book).applied().is_empty());
}

#[test]
fn invalid_edit_never_reaches_store() {
    let store = ProbeStore::new();
    store.seed(5, ann());
    let mut book = book_with(store);

    book.load_for_edit(RecordId::new(5)).unwrap();
    book.input(FieldName::Email, "not-an-email");
    let err = book.submit().unwrap_err();
    assert!(matches!(err, ClientError::InvalidForm { .. }));
    assert!(probe(&book).applied().is_empty());
    assert_eq!(book.form().edit_state().editing_id(), Some(5.0));
    let stored = probe(&book).inner().get(RecordId::new(5)).unwrap().unwrap();
    assert_eq!(stored, ann().with_id(RecordId::new(5)));
}

#[test]
fn read_failure_keeps_previous_list() {
    let store = ProbeStore::new();
    store.seed(1, ann());
    let mut book = book_with(store);
    assert_eq!(book.view().rows().len(), 1);

    probe(&book).fail_reads(true);
    let err = book.refresh().unwrap_err();
    assert!(matches!(err, ClientError::ReadFailure(_)));
    assert_eq!(book.view().rows().len(), 1);
    assert_eq!(book.view().last_notice().unwrap().kind, NoticeKind::Error);
}

#[test]
fn delete_removes_row() {
    let store = ProbeStore::new();
    store.seed(1, ann());
    store.seed(2, ClientRecord::new("Bob Ray", "bob@x.com", "555-987-6543"));
    let mut book = book_with(store);
    assert_eq!(book.view().rows().len(), 2);

    let action = RowAction::from_trigger("delete", "1").unwrap();
    book.dispatch(action).unwrap();

    assert_eq!(book.view().rows().len(), 1);
    assert_eq!(book.view().rows()[0].id, RecordId::new(2));
    assert_eq!(
        probe(&book).applied(),
        vec![vec![WriteOp::Delete(RecordId::new(1))]]
    );
}

#[test]
fn failed_delete_leaves_data() {
    let store = ProbeStore::new();
    store.seed(1, ann());
    let mut book = book_with(store);
    probe(&book).fail_writes(true);

    let err = book.delete_record(RecordId::new(1)).unwrap_err();
    assert!(matches!(err, ClientError::TransactionFailure(_)));
    assert_eq!(probe(&book).inner().get_all().unwrap().len(), 1);
    assert_eq!(book.view().rows().len(), 1);
}

#[test]
fn edit_trigger_loads_form() {
    let store = ProbeStore::new();
    store.seed(9, ann());
    let mut book = book_with(store);

    let action = book.view().rows()[0].edit();
    book.dispatch(action).unwrap();
    assert_eq!(book.form().field(FieldName::Email).value(), "ann@x.com");
    assert!(book.form().edit_state().is_editing());
}

#[test]
fn rendered_rows_are_escaped() {
    let store = ProbeStore::new();
    store.seed(1, ClientRecord::new("<script>", "a&b@x.com", "555-123-4567"));
    let book = book_with(store);

    let row = &book.view().rows()[0];
    assert_eq!(row.name, "&lt;script&gt;");
    assert_eq!(row.email, "a&amp;b@x.com");
}

#[test]
fn submit_gate_ignores_touch_state() {
    let names = ["", "A", "Al", "Ann Lee"];
    let emails = ["", "a@b", "a b@c.com", "a@b.com"];
    let phones = ["", "555", "555123456", "5551234567"];

    for name in names {
        for email in emails {
            for phone in phones {
                let expected = name.trim().chars().count() >= 2
                    && email == "a@b.com"
                    && phone == "5551234567";

                let mut book = book();
                fill(&mut book, name, email, phone);
                assert_eq!(
                    book.view().submit_enabled(),
                    expected,
                    "{name:?} {email:?} {phone:?}"
                );
                assert_eq!(book.form().is_submittable(), expected);
            }
        }
    }
}

#[test]
fn paste_and_blur_touch_fields() {
    let mut book = book();

    assert_eq!(book.blur(FieldName::Name), FieldStatus::TouchedInvalid);
    assert_eq!(book.form().marker(FieldName::Name), Marker::Invalid);
    assert_eq!(book.form().marker(FieldName::Email), Marker::Neutral);

    assert_eq!(
        book.paste(FieldName::Phone, "555.123.4567"),
        FieldStatus::TouchedValid
    );
    assert_eq!(book.form().field(FieldName::Phone).value(), "555-123-4567");
}
