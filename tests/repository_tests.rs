use fleetdesk::backend::memory::Call;
use fleetdesk::core::{Repository, SessionCache};
use fleetdesk::errors::AppError;
use fleetdesk::models::{Row, Tabular};
use fleetdesk::registry;
use serde_json::json;

mod common;
use common::{fuel_row, memory_session, user_row};

fn column_names(table: &str) -> Vec<String> {
    registry::columns_of(table)
        .unwrap()
        .iter()
        .map(|c| c.to_string())
        .collect()
}

#[test]
fn cold_read_of_empty_backend_has_registered_columns() {
    let (_backend, mut repo) = memory_session();

    for def in registry::tables() {
        let tabular = repo.get(def.name).unwrap();
        assert_eq!(tabular.columns(), column_names(def.name).as_slice());
        assert_eq!(tabular.len(), 0, "{} should be empty", def.name);
    }
}

#[test]
fn fuel_logs_cold_read_has_eleven_columns() {
    let (_backend, mut repo) = memory_session();

    let tabular = repo.get("Fuel_Logs").unwrap();
    assert_eq!(tabular.columns().len(), 11);
    assert_eq!(tabular.columns()[0], "Log_ID");
    assert_eq!(tabular.columns()[10], "Created_By");
    assert!(tabular.is_empty());
}

#[test]
fn backend_failure_degrades_every_table_to_empty_schema() {
    let (backend, mut repo) = memory_session();
    backend.set_failing(true);

    for def in registry::tables() {
        let tabular = repo.get(def.name).unwrap();
        assert_eq!(tabular.columns(), column_names(def.name).as_slice());
        assert!(tabular.is_empty());
    }
}

#[test]
fn jobs_main_read_survives_backend_failure() {
    let (backend, mut repo) = memory_session();
    backend.seed("Jobs_Main", vec![Row::new().with("Job_ID", "J1")]);
    backend.set_failing(true);

    let tabular = repo.get("Jobs_Main").unwrap();
    assert_eq!(tabular.columns(), column_names("Jobs_Main").as_slice());
    assert_eq!(tabular.len(), 0);
    // the degraded result is cached like any other
    assert!(repo.cache().contains("Jobs_Main"));
}

#[test]
fn get_serves_cache_without_backend_round_trip() {
    let (backend, mut repo) = memory_session();
    backend.seed("Stock_Parts", vec![Row::new().with("Part_ID", "P1")]);

    assert_eq!(repo.get("Stock_Parts").unwrap().len(), 1);
    backend.seed(
        "Stock_Parts",
        vec![Row::new().with("Part_ID", "P1"), Row::new().with("Part_ID", "P2")],
    );
    assert_eq!(repo.get("Stock_Parts").unwrap().len(), 1);

    let selects = backend
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::SelectAll(t) if t == "Stock_Parts"))
        .count();
    assert_eq!(selects, 1);

    assert_eq!(repo.refetch("Stock_Parts").unwrap().len(), 2);
}

#[test]
fn fetched_rows_keep_registered_columns_and_extras() {
    let (backend, mut repo) = memory_session();
    backend.seed(
        "System_Config",
        vec![
            Row::new()
                .with("Key", "fuel_price")
                .with("Value", "32.5")
                .with("Updated_By", "admin"),
        ],
    );

    let tabular = repo.get("System_Config").unwrap();
    assert_eq!(
        tabular.columns(),
        ["Key", "Value", "Description", "Category", "Updated_By"]
    );
    assert_eq!(tabular.rows()[0].text("Value"), "32.5");
}

#[test]
fn append_after_cold_read_adds_row() {
    let (_backend, mut repo) = memory_session();
    repo.get("Fuel_Logs").unwrap();

    let ok = repo
        .append("Fuel_Logs", fuel_row("F1", 50.0, 2000.0))
        .unwrap();
    assert!(ok);

    let tabular = repo.get("Fuel_Logs").unwrap();
    assert_eq!(tabular.len(), 1);
    assert_eq!(tabular.last().unwrap().text("Log_ID"), "F1");
    assert_eq!(tabular.columns().len(), 11);
}

#[test]
fn append_without_cache_creates_entry_from_row() {
    let (backend, mut repo) = memory_session();
    backend.seed("Fuel_Logs", vec![fuel_row("F0", 10.0, 400.0)]);

    assert!(repo.append("Fuel_Logs", fuel_row("F1", 50.0, 2000.0)).unwrap());

    // the cache was absent: the entry is built from the appended row alone
    let tabular = repo.get("Fuel_Logs").unwrap();
    assert_eq!(tabular.len(), 1);
    assert_eq!(tabular.last().unwrap().text("Log_ID"), "F1");
    assert_eq!(tabular.columns(), column_names("Fuel_Logs").as_slice());
}

#[test]
fn append_to_populated_cache_goes_last() {
    let (backend, mut repo) = memory_session();
    backend.seed(
        "Fuel_Logs",
        vec![fuel_row("F0", 10.0, 400.0), fuel_row("F1", 20.0, 800.0)],
    );
    repo.get("Fuel_Logs").unwrap();

    assert!(repo.append("Fuel_Logs", fuel_row("F2", 30.0, 1200.0)).unwrap());

    let tabular = repo.get("Fuel_Logs").unwrap();
    assert_eq!(tabular.column_text("Log_ID"), ["F0", "F1", "F2"]);
    assert_eq!(backend.rows("Fuel_Logs").len(), 3);
}

#[test]
fn append_forwards_unknown_keys_verbatim() {
    let (backend, mut repo) = memory_session();

    let row = fuel_row("F9", 1.0, 1.0).with("Fuel_Type", "diesel");
    assert!(repo.append("Fuel_Logs", row.clone()).unwrap());

    assert_eq!(backend.calls(), vec![Call::Insert("Fuel_Logs".into(), row)]);
    assert!(
        repo.get("Fuel_Logs")
            .unwrap()
            .columns()
            .iter()
            .any(|c| c == "Fuel_Type")
    );
}

#[test]
fn append_list_is_rejected_without_backend_call() {
    let (backend, mut repo) = memory_session();
    repo.get("Fuel_Logs").unwrap();
    assert!(repo.append("Fuel_Logs", fuel_row("F1", 50.0, 2000.0)).unwrap());
    let before = repo.get("Fuel_Logs").unwrap().clone();
    backend.clear_calls();

    let ok = repo
        .append("Fuel_Logs", json!([{ "Log_ID": "F2" }]))
        .unwrap();
    assert!(!ok);

    let ok = repo
        .append("Fuel_Logs", vec![Row::new().with("Log_ID", "F3")])
        .unwrap();
    assert!(!ok);

    assert!(backend.calls().is_empty());
    assert_eq!(repo.get("Fuel_Logs").unwrap(), &before);
}

#[test]
fn append_scalar_is_rejected_without_backend_call() {
    let (backend, mut repo) = memory_session();

    assert!(!repo.append("Fuel_Logs", json!("F1")).unwrap());
    assert!(!repo.append("Fuel_Logs", json!(null)).unwrap());
    assert!(backend.calls().is_empty());
}

#[test]
fn append_backend_failure_leaves_cache_untouched() {
    let (backend, mut repo) = memory_session();
    backend.seed("Fuel_Logs", vec![fuel_row("F0", 10.0, 400.0)]);
    repo.get("Fuel_Logs").unwrap();

    backend.set_failing(true);
    assert!(!repo.append("Fuel_Logs", fuel_row("F1", 5.0, 200.0)).unwrap());
    assert_eq!(repo.get("Fuel_Logs").unwrap().len(), 1);

    // no entry is created either when there was none
    assert!(!repo.append("Rate_Card", Row::new().with("Distance_Start", 0)).unwrap());
    assert!(!repo.cache().contains("Rate_Card"));
}

#[test]
fn replace_overwrites_cache_with_given_table() {
    let (backend, mut repo) = memory_session();
    backend.seed(
        "Master_Users",
        vec![user_row("somchai", "admin"), user_row("malee", "driver")],
    );
    assert_eq!(repo.get("Master_Users").unwrap().len(), 2);
    backend.clear_calls();

    let def = registry::lookup("Master_Users").unwrap();
    let replacement = Tabular::with_schema(def, vec![user_row("malee", "dispatcher")]);

    assert!(repo.replace("Master_Users", replacement.clone()).unwrap());
    assert_eq!(
        backend.calls(),
        vec![Call::Upsert(
            "Master_Users".into(),
            vec![user_row("malee", "dispatcher")]
        )]
    );
    assert_eq!(repo.get("Master_Users").unwrap(), &replacement);

    // the backend merged by key: somchai untouched, malee replaced
    let stored = backend.rows("Master_Users");
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].text("Role"), "dispatcher");
}

#[test]
fn replace_backend_failure_keeps_previous_cache() {
    let (backend, mut repo) = memory_session();
    backend.seed("Master_Users", vec![user_row("somchai", "admin")]);
    let before = repo.get("Master_Users").unwrap().clone();

    backend.set_failing(true);
    let def = registry::lookup("Master_Users").unwrap();
    let ok = repo
        .replace("Master_Users", Tabular::with_schema(def, vec![]))
        .unwrap();
    assert!(!ok);
    assert_eq!(repo.get("Master_Users").unwrap(), &before);
}

#[test]
fn replace_refuses_table_without_registered_columns() {
    let (backend, mut repo) = memory_session();
    backend.seed("Master_Users", vec![user_row("somchai", "admin")]);
    let before = repo.get("Master_Users").unwrap().clone();
    backend.clear_calls();

    let partial = Tabular::new(
        vec!["Username".into()],
        vec![Row::new().with("Username", "malee")],
    );
    let err = repo.replace("Master_Users", partial).unwrap_err();
    assert!(matches!(err, AppError::InvalidRowShape(_)));
    assert!(err.is_programming_error());

    // columns of another table are refused as well
    let fuel_def = registry::lookup("Fuel_Logs").unwrap();
    let foreign = Tabular::with_schema(fuel_def, vec![fuel_row("F1", 5.0, 200.0)]);
    assert!(matches!(
        repo.replace("Master_Users", foreign),
        Err(AppError::InvalidRowShape(_))
    ));

    // registered columns in another order are not the registered schema
    let mut reordered = column_names("Master_Users");
    reordered.swap(0, 1);
    assert!(matches!(
        repo.replace("Master_Users", Tabular::new(reordered, vec![])),
        Err(AppError::InvalidRowShape(_))
    ));

    assert!(backend.calls().is_empty());
    assert_eq!(repo.get("Master_Users").unwrap(), &before);
}

#[test]
fn replace_keeps_extra_columns_after_registered_ones() {
    let (_backend, mut repo) = memory_session();
    let def = registry::lookup("System_Config").unwrap();
    let tabular = Tabular::with_schema(
        def,
        vec![Row::new().with("Key", "fuel_price").with("Owner", "ops")],
    );

    assert!(repo.replace("System_Config", tabular.clone()).unwrap());
    let cached = repo.get("System_Config").unwrap();
    assert_eq!(cached, &tabular);
    assert_eq!(cached.columns().last().map(String::as_str), Some("Owner"));
}

#[test]
fn load_all_populates_every_declared_table() {
    let (backend, mut repo) = memory_session();
    backend.seed("Rate_Card", vec![Row::new().with("Distance_Start", 0)]);

    let report = repo.load_all();
    assert!(report.is_clean());
    assert_eq!(report.total(), registry::table_names().len());

    let mut expected = registry::table_names();
    expected.sort_unstable();
    assert_eq!(repo.cache().tables(), expected);
    assert_eq!(repo.cache().get("Rate_Card").unwrap().len(), 1);
}

#[test]
fn load_all_isolates_failing_table() {
    let (backend, mut repo) = memory_session();
    backend.seed("Master_Drivers", vec![Row::new().with("Driver_ID", "D1")]);
    backend.seed("Jobs_Main", vec![Row::new().with("Job_ID", "J1")]);
    backend.fail_table("Jobs_Main");

    let report = repo.load_all();
    assert_eq!(report.degraded.len(), 1);
    assert_eq!(report.degraded[0].0, "Jobs_Main");
    assert_eq!(report.loaded.len(), registry::table_names().len() - 1);

    assert_eq!(repo.cache().len(), registry::table_names().len());
    assert!(repo.cache().get("Jobs_Main").unwrap().is_empty());
    assert_eq!(
        repo.cache().get("Jobs_Main").unwrap().columns(),
        column_names("Jobs_Main").as_slice()
    );
    assert_eq!(repo.cache().get("Master_Drivers").unwrap().len(), 1);
}

#[test]
fn unknown_table_is_a_programming_error_everywhere() {
    let (backend, mut repo) = memory_session();

    let err = repo.get("Not_A_Table").unwrap_err();
    assert!(matches!(&err, AppError::UnknownTable(t) if t == "Not_A_Table"));
    assert!(err.is_programming_error());

    assert!(matches!(
        repo.refetch("Not_A_Table"),
        Err(AppError::UnknownTable(_))
    ));
    assert!(matches!(
        repo.append("Not_A_Table", Row::new().with("a", 1)),
        Err(AppError::UnknownTable(_))
    ));
    assert!(matches!(
        repo.replace("Not_A_Table", Tabular::default()),
        Err(AppError::UnknownTable(_))
    ));
    assert!(matches!(repo.drop("Not_A_Table"), Err(AppError::UnknownTable(_))));

    // table names are case sensitive
    assert!(matches!(repo.get("fuel_logs"), Err(AppError::UnknownTable(_))));
    assert!(backend.calls().is_empty());
}

#[test]
fn drop_forces_next_get_to_refetch() {
    let (backend, mut repo) = memory_session();
    repo.get("Master_Routes").unwrap();
    backend.seed("Master_Routes", vec![Row::new().with("Route_ID", "R1")]);

    assert!(repo.drop("Master_Routes").unwrap());
    assert!(!repo.drop("Master_Routes").unwrap());
    assert_eq!(repo.get("Master_Routes").unwrap().len(), 1);

    repo.drop_all();
    assert!(repo.cache().is_empty());
}

#[test]
fn sessions_do_not_share_caches() {
    let (backend, mut first) = memory_session();
    let mut second = Repository::new(backend.clone());

    first.get("Master_Customers").unwrap();
    assert!(first.append("Master_Customers", Row::new().with("Customer_ID", "C1")).unwrap());

    assert_eq!(first.get("Master_Customers").unwrap().len(), 1);
    assert!(!second.cache().contains("Master_Customers"));
    assert_eq!(second.get("Master_Customers").unwrap().len(), 1);
}

#[test]
fn cache_survives_session_handover() {
    let (backend, mut repo) = memory_session();
    repo.get("Repair_Tickets").unwrap();

    let cache: SessionCache = repo.into_cache();
    assert!(cache.contains("Repair_Tickets"));

    let mut resumed = Repository::with_cache(backend.clone(), cache);
    backend.clear_calls();
    resumed.get("Repair_Tickets").unwrap();
    assert!(backend.calls().is_empty());
}
