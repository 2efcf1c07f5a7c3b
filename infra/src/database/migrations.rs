//! Schema for the users and listings tables
//!
//! Every statement is idempotent so the list can be replayed on each start.

/// Ordered (name, statement) pairs
pub const STATEMENTS: &[(&str, &str)] = &[
    ("create_users", CREATE_USERS),
    ("create_listings", CREATE_LISTINGS),
    ("index_listings_created_at", INDEX_LISTINGS_CREATED_AT),
    ("index_listings_owner", INDEX_LISTINGS_OWNER),
];

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id                 BIGSERIAL PRIMARY KEY,
        email              TEXT NOT NULL UNIQUE,
        name               TEXT,
        password_hash      TEXT NOT NULL,
        role               SMALLINT NOT NULL CHECK (role IN (1, 2, 3)),
        photo              TEXT,
        refresh_token_hash TEXT,
        created_at         TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at         TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const CREATE_LISTINGS: &str = r#"
    CREATE TABLE IF NOT EXISTS listings (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        description TEXT NOT NULL,
        floor_area  INTEGER NOT NULL,
        rent        INTEGER NOT NULL,
        rooms       INTEGER NOT NULL,
        address     TEXT NOT NULL,
        photo       TEXT,
        available   BOOLEAN NOT NULL DEFAULT TRUE,
        latitude    DOUBLE PRECISION NOT NULL,
        longitude   DOUBLE PRECISION NOT NULL,
        owner_id    BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const INDEX_LISTINGS_CREATED_AT: &str =
    "CREATE INDEX IF NOT EXISTS listings_created_at_idx ON listings (created_at DESC)";

const INDEX_LISTINGS_OWNER: &str =
    "CREATE INDEX IF NOT EXISTS listings_owner_id_idx ON listings (owner_id)";
