/// Test module for auth-service
///
/// Orchestrator tests run against in-memory credential/session stores so the
/// whole lifecycle is exercised without Postgres or Redis.
pub mod fixtures;
