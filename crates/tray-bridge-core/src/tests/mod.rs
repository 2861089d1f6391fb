mod host;
mod popup;
mod router;
