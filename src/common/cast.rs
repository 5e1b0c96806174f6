use num_traits::ToPrimitive;

pub fn f64_to_u32(num: f64) -> Option<u32> {
    num.round().to_u32()
}

pub fn f64_to_i32(num: f64) -> Option<i32> {
    num.round().to_i32()
}
