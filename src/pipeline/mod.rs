pub mod stage1_inputs;
pub mod stage2_missing;
pub mod stage3_ratios;
pub mod stage4_state;
pub mod stage5_summary;
