pub mod result_tab;
pub mod run_result_store;
pub mod tab_id;
