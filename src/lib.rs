pub mod core {
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod events;
    pub mod library;
    pub mod repository;
}

pub mod books {
    pub mod domain;
    pub mod dto;
}

pub mod members {
    pub mod domain;
    pub mod dto;
}

pub mod catalog;
pub mod gateway;

pub mod utils {
    pub mod date;
    pub mod logs;
}
