/// Registration, login and profile routes.
pub(crate) mod auth;

/// File upload and retrieval routes.
pub(crate) mod files;

/// Health check route.
pub(crate) mod health;

/// Team scoring leaderboard routes.
pub(crate) mod leaderboard;

/// Meeting scheduling and lifecycle routes.
pub(crate) mod meetings;

/// Senior mentor directory and mentorship request routes.
pub(crate) mod mentors;

/// Professor directory and mentorship request routes.
pub(crate) mod professors;

/// Team management routes.
pub(crate) mod teams;
