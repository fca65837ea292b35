pub mod applications;
pub mod review;
pub mod vacancies;
pub mod wire;
