pub mod l2;
pub mod summation;
