use super::error::FilterError;

/// Offset/limit pair accepted by the list procedures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub skip: i64,
    pub page_size: i64,
}

impl Paging {
    pub fn new(skip: i64, page_size: i64, max_page_size: i64) -> Result<Self, FilterError> {
        if skip < 0 {
            return Err(FilterError::InvalidSkip(skip));
        }
        if page_size < 1 || page_size > max_page_size {
            return Err(FilterError::InvalidPageSize(page_size, max_page_size));
        }
        Ok(Self { skip, page_size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(Paging::new(0, 1, 10).unwrap(), Paging { skip: 0, page_size: 1 });
        assert_eq!(Paging::new(40, 10, 10).unwrap().page_size, 10);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Paging::new(-1, 5, 10), Err(FilterError::InvalidSkip(-1)));
        assert_eq!(Paging::new(0, 0, 10), Err(FilterError::InvalidPageSize(0, 10)));
        assert_eq!(Paging::new(0, 11, 10), Err(FilterError::InvalidPageSize(11, 10)));
    }
}
