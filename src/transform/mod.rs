pub mod linear;
pub mod pointer;
pub mod proximity;
pub mod scroll;
pub mod spring;
