//! Property-based tests using proptest

use proptest::prelude::*;
use rust_sql_executor::core::placeholder;
use rust_sql_executor::prelude::*;
use rust_sql_executor::{NativeParam, ParamType};

fn any_param() -> impl Strategy<Value = Param> {
    prop_oneof![
        any::<bool>().prop_map(Param::from),
        any::<i64>().prop_map(Param::from),
        ".*".prop_map(Param::from),
        any::<f64>().prop_map(Param::from),
        Just(Param::Null),
    ]
}

// ============================================================================
// Type Mapping
// ============================================================================

proptest! {
    /// Every supported kind maps onto the closed native type set
    #[test]
    fn test_native_type_mapping(param in any_param()) {
        let expected = match &param {
            Param::Bool(_) => ParamType::Bool,
            Param::Int(_) => ParamType::Int,
            Param::Str(_) | Param::Float(_) => ParamType::Str,
            Param::Null => ParamType::Null,
        };
        prop_assert_eq!(param.param_type(), expected);
        prop_assert_eq!(param.to_native().param_type(), expected);
    }

    /// Floats are bound as their `Display` text
    #[test]
    fn test_float_binds_as_display_text(value in any::<f64>()) {
        let param = Param::from(value);
        let native = param.to_native();
        prop_assert_eq!(native, NativeParam::Str(value.to_string().into()));
    }

    /// Integer widths all collapse to a 64-bit INT
    #[test]
    fn test_integers_bind_as_int(a in any::<i32>(), b in any::<u32>(), c in any::<i16>()) {
        prop_assert_eq!(Param::from(a), Param::Int(i64::from(a)));
        prop_assert_eq!(Param::from(b), Param::Int(i64::from(b)));
        prop_assert_eq!(Param::from(c).param_type(), ParamType::Int);
    }
}

// ============================================================================
// Placeholder Scanning
// ============================================================================

proptest! {
    /// Every generated placeholder is found, distinct names are numbered once
    #[test]
    fn test_placeholders_found(names in prop::collection::vec("[a-z_][a-z0-9_]{0,8}", 1..8)) {
        let sql = format!(
            "SELECT {} FROM t",
            names.iter().map(|n| placeholder::placeholder(n)).collect::<Vec<_>>().join(", ")
        );

        let found = placeholder::scan(&sql);
        prop_assert_eq!(found.len(), names.len());

        let (text, numbered) = placeholder::to_numbered(&sql, '?');
        let has_brace = text.contains('{');
        prop_assert!(!has_brace);
        for name in &names {
            prop_assert!(numbered.contains(name));
        }
        let mut distinct = names.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(numbered.len(), distinct.len());
    }

    /// Placeholders inside string literals are never treated as parameters
    #[test]
    fn test_literal_placeholders_ignored(name in "[a-z][a-z0-9_]{0,8}") {
        let sql = format!("SELECT '{}' AS v", placeholder::placeholder(&name));
        prop_assert!(placeholder::names(&sql).is_empty());
    }
}

// ============================================================================
// Transactions
// ============================================================================

#[cfg(feature = "sqlite")]
mod transactions {
    use super::*;

    fn connect() -> SqliteConnection {
        let conn = SqliteConnection::open(&ConnectionOptions::new(":memory:")).unwrap();
        conn.exec("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)", &params! {})
            .unwrap();
        conn
    }

    fn count(conn: &SqliteConnection) -> i64 {
        conn.query("SELECT COUNT(*) AS n FROM t", &params! {}).unwrap()[0]["n"]
            .as_int()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// A unit of work that fails after N statements leaves no trace
        #[test]
        fn test_failed_work_is_all_or_nothing(n in 0usize..20) {
            let conn = connect();
            let result = conn.transaction(|tx| {
                for id in 0..n {
                    tx.exec("INSERT INTO t(id, v) VALUES({id}, {v})", &params! { "id" => id as i64, "v" => "x" })?;
                }
                Err::<(), _>(DatabaseError::InvalidConfig("abort".to_string()))
            });
            prop_assert!(result.is_err());
            prop_assert_eq!(count(&conn), 0);
        }

        /// A unit of work that succeeds leaves every statement visible
        #[test]
        fn test_successful_work_is_visible(n in 0usize..20) {
            let conn = connect();
            conn.transaction(|tx| {
                for id in 0..n {
                    tx.exec("INSERT INTO t(id, v) VALUES({id}, {v})", &params! { "id" => id as i64, "v" => "x" })?;
                }
                Ok::<_, DatabaseError>(())
            }).unwrap();
            prop_assert_eq!(count(&conn), n as i64);
        }

        /// Strings round-trip through binding unchanged
        #[test]
        fn test_string_binding_roundtrip(value in ".*") {
            let conn = connect();
            conn.exec("INSERT INTO t(id, v) VALUES({id}, {v})", &params! { "id" => 1, "v" => value.as_str() })
                .unwrap();
            let rows = conn.query("SELECT v FROM t WHERE id = {id}", &params! { "id" => 1 }).unwrap();
            prop_assert_eq!(rows[0]["v"].as_str(), Some(value.as_str()));
        }
    }
}
