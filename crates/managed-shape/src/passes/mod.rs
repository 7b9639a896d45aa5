pub mod base_overload;
pub mod class_surface_dedup;
pub mod conformance;
pub mod constraint_closer;
pub mod dedup;
pub mod diamond;
pub mod explicit_impl;
pub mod hidden_member;
pub mod indexer;
pub mod inliner;
pub mod internal_filter;
pub mod overload_conflict;
pub mod static_side;
pub mod synthesis;
pub mod view_planner;
