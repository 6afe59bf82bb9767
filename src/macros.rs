//===========================================================================//

macro_rules! invalid_icon {
    ($name:expr, $e:expr) => {
        return Err($crate::error::Error::structural($name, $e))
    };
    ($name:expr, $fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::structural($name,
                                                    format!($fmt, $($arg)+)))
    };
}

macro_rules! malformed {
    ($name:expr, $e:expr) => {
        return Err($crate::error::Error::malformed($name, $e))
    };
    ($name:expr, $fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::malformed($name,
                                                  format!($fmt, $($arg)+)))
    };
}

//===========================================================================//
