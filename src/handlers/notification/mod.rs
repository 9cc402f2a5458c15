pub mod send_notif;
