// BoardVault state managers
// The record board and the pure view derivations it renders from.

pub mod record_board;
pub mod record_view;
