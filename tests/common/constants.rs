//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (user credentials, etc.), update only this file.

// ============================================================================
// Test User Credentials
// ============================================================================

/// First test user email
pub const ALICE_EMAIL: &str = "alice@example.com";

/// First test user password
pub const ALICE_PASS: &str = "alicepass123";

/// Second test user email
pub const BOB_EMAIL: &str = "bob@example.com";

/// Second test user password
pub const BOB_PASS: &str = "bobpass123";

// ============================================================================
// Server Configuration
// ============================================================================

/// Token signing secret used by test servers
pub const TEST_JWT_SECRET: &str = "e2e-test-secret";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
