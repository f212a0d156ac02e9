//! Unit tests for the recommendation engine
