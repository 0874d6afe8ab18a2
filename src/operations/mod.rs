pub mod diagnostic_op;
pub mod op_helper;
pub mod snapshot_op;
pub mod stream_admin_op;
pub mod webcam_list_op;
