use crate::analyzer::indicators::IndicatorSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Backing services a repository may need alongside the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Postgresql,
    Mysql,
    Sqlite,
    Mongodb,
    Redis,
    Elasticsearch,
    Cassandra,
}

impl Database {
    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Postgresql => "postgresql",
            Database::Mysql => "mysql",
            Database::Sqlite => "sqlite",
            Database::Mongodb => "mongodb",
            Database::Redis => "redis",
            Database::Elasticsearch => "elasticsearch",
            Database::Cassandra => "cassandra",
        }
    }

    /// Embedded databases live inside the application container
    pub fn needs_service(&self) -> bool {
        !matches!(self, Database::Sqlite)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DATABASE_INDICATORS: &[(Database, &[&str])] = &[
    (Database::Postgresql, &["postgresql", "postgres", "psycopg2", "pg_", "postgresql://"]),
    (Database::Mysql, &["mysql", "pymysql", "mysql2", "mysql://"]),
    (Database::Sqlite, &["sqlite", "sqlite3", "sqlite://"]),
    (Database::Mongodb, &["mongodb", "pymongo", "mongoose", "mongodb://"]),
    (Database::Redis, &["redis", "redis-py", "ioredis", "redis://"]),
    (Database::Elasticsearch, &["elasticsearch", "elastic", "elasticsearch://"]),
    (Database::Cassandra, &["cassandra", "datastax", "cassandra://"]),
];

static DATABASE_MATCHER: Lazy<IndicatorSet<Database>> =
    Lazy::new(|| IndicatorSet::new(DATABASE_INDICATORS).expect("database indicator table is valid"));

/// Databases mentioned anywhere in the scanned documents, case-insensitively
pub fn detect_database_requirements(contents: &BTreeMap<String, String>) -> BTreeSet<Database> {
    let mut databases = BTreeSet::new();

    for (path, content) in contents {
        let found = DATABASE_MATCHER.matched_labels(content);
        if !found.is_empty() {
            log::debug!("{} references {:?}", path, found);
        }
        databases.extend(found);
    }

    databases
}
