//! Feature slices of the widget.
pub mod login_form;
