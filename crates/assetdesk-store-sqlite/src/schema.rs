//! SQL schema for the asset desk SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Employee, department and asset references are weak: a referenced record
/// may be deleted and readers treat the dangling id as unresolved, so there
/// are no foreign keys.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS departments (
    department_id TEXT PRIMARY KEY,
    name          TEXT NOT NULL UNIQUE,
    description   TEXT,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS employees (
    employee_id   TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL,
    phone         TEXT NOT NULL,
    cpf           TEXT,
    department_id TEXT,
    position      TEXT NOT NULL,
    hire_date     TEXT,             -- YYYY-MM-DD
    status        TEXT NOT NULL,
    accessories   TEXT NOT NULL DEFAULT '{}',  -- JSON object key -> bool
    notes         TEXT,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS assets (
    asset_id        TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    category        TEXT NOT NULL,
    brand           TEXT,
    model           TEXT,
    serial_number   TEXT NOT NULL UNIQUE,
    status          TEXT NOT NULL,
    assigned_to     TEXT,
    assigned_date   TEXT,           -- YYYY-MM-DD
    specifications  TEXT NOT NULL DEFAULT '{}',
    purchase_date   TEXT,
    purchase_value  TEXT,           -- decimal string
    supplier        TEXT,
    warranty_months INTEGER,
    location        TEXT,
    description     TEXT,
    history         TEXT NOT NULL DEFAULT '[]',
    created_at      TEXT NOT NULL,
    CHECK ((assigned_to IS NULL) = (assigned_date IS NULL))
);

CREATE INDEX IF NOT EXISTS assets_status_idx      ON assets(status);
CREATE INDEX IF NOT EXISTS assets_assigned_to_idx ON assets(assigned_to);
CREATE INDEX IF NOT EXISTS employees_dept_idx     ON employees(department_id);

PRAGMA user_version = 1;
";
