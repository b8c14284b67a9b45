mod logger;
mod position;
