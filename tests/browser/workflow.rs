//! Full browse-then-delete workflow through the executor.

use dsview::{Command, DeleteRequest, Executor, StoreMode};

use crate::common::{body, game_store};

#[test]
fn browse_and_delete() {
    let executor = Executor::new(game_store(), StoreMode::Datastore);

    assert_eq!(
        body(executor.execute(Command::ListNamespaces)),
        r#"{"namespaces":["default"]}"#
    );
    assert_eq!(
        body(executor.execute(Command::ListKinds {
            namespace: "default".into()
        })),
        r#"{"kinds":["Item","Player"]}"#
    );
    assert_eq!(
        body(executor.execute(Command::GetProperties {
            namespace: "default".into(),
            kind: "Player".into(),
        })),
        r#"{"properties":["ID/Name","Address","Score"]}"#
    );
    assert_eq!(
        body(executor.execute(Command::GetEntities {
            namespace: "default".into(),
            kind: "Player".into(),
        })),
        r#"{"entities":[{"ID/Name":"/Player,7","Address":{"Street":"Main"},"Score":42},{"ID/Name":"/Player,alice","Score":10}]}"#
    );

    let request = DeleteRequest::from_json(br#"{"keys":["/Player,7/Item,3"]}"#).unwrap();
    assert_eq!(
        body(executor.execute(request.into_command("default", "Item"))),
        r#"{"deleted":1}"#
    );
    assert_eq!(
        body(executor.execute(Command::GetEntities {
            namespace: "default".into(),
            kind: "Item".into(),
        })),
        r#"{"entities":[]}"#
    );
}

#[test]
fn identities_feed_back_into_delete() {
    let executor = Executor::new(game_store(), StoreMode::Datastore);
    let batch = match executor
        .execute(Command::GetEntities {
            namespace: "default".into(),
            kind: "Player".into(),
        })
        .unwrap()
    {
        dsview::Output::Entities(batch) => batch,
        other => panic!("unexpected output {:?}", other),
    };

    // Every identity shown is a valid delete path.
    let keys: Vec<String> = batch.identities().into_iter().map(String::from).collect();
    executor
        .execute(Command::DeleteEntities {
            namespace: "default".into(),
            kind: "Player".into(),
            keys,
        })
        .unwrap();

    assert_eq!(
        body(executor.execute(Command::GetEntities {
            namespace: "default".into(),
            kind: "Player".into(),
        })),
        r#"{"entities":[]}"#
    );
}

#[test]
fn malformed_request_is_client_error() {
    let executor = Executor::new(game_store(), StoreMode::Datastore);
    let err = DeleteRequest::from_json(b"{\"keys\":").unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = executor
        .execute(Command::DeleteEntities {
            namespace: "default".into(),
            kind: "Player".into(),
            keys: vec!["/Player,7/Item".into()],
        })
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
