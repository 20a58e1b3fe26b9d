pub mod quantity_util;
