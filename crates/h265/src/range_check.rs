macro_rules! range_check {
    ($n:expr, $lower:expr, $upper:expr) => {{
        let n = $n;

        #[allow(unused_comparisons)]
        if n < $lower || n > $upper {
            ::std::result::Result::Err($crate::error::Error::Protocol(format!(
                "{} is out of range [{}, {}]: {}",
                stringify!($n),
                $lower,
                $upper,
                n
            )))
        } else {
            ::std::result::Result::Ok(())
        }
    }};
}

pub(crate) use range_check;

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    #[test]
    fn in_range() {
        let i = 2u32;
        range_check!(i, 0, 63).unwrap();
    }

    #[test]
    fn out_of_range() {
        let i = 64u32;
        assert!(range_check!(i, 0, 63).is_err());
    }
}
