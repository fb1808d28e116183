//! Delivery channels and the concurrent dispatcher that drives them.

mod dispatch;
mod email;
mod server_chan;

pub use dispatch::{DispatchReport, Dispatcher};
pub use email::{
    email_subject, send_email, EmailSettings, MailTransport, SmtpMailer, SMTP_PORT,
};
pub use server_chan::{truncate_title, ServerChanClient, MAX_TITLE_CHARS};
