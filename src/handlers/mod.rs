pub mod global_404;
pub mod notification;

pub use global_404::global_404_handler;

pub use notification::send_notif::send_notif_handler;
