//! 主数据表单
//!
//! 门店和商品的录入表单，所有字段以文本保存，发送前在客户端校验。

use validator::Validate;

use crate::amount::parse_amount;
use crate::error::{ApiError, ApiResult};
use crate::protocol::{ItemInput, OutletInput};
use crate::{Item, Outlet};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Semua field harus diisi!";

fn required_error() -> ApiError {
    ApiError::Validation(REQUIRED_FIELDS_MESSAGE.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct OutletForm {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
}

impl OutletForm {
    pub fn from_outlet(outlet: &Outlet) -> Self {
        Self {
            code: outlet.code.clone(),
            name: outlet.name.clone(),
        }
    }

    pub fn to_input(&self) -> ApiResult<OutletInput> {
        self.validate().map_err(|_| required_error())?;
        Ok(OutletInput {
            code: self.code.clone(),
            name: self.name.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ItemForm {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub price: String,
}

impl ItemForm {
    /// 价格未知时编辑框为空
    pub fn from_item(item: &Item) -> Self {
        Self {
            code: item.code.clone(),
            name: item.name.clone(),
            price: item
                .price
                .map(crate::amount::format_amount)
                .unwrap_or_default(),
        }
    }

    pub fn to_input(&self) -> ApiResult<ItemInput> {
        self.validate().map_err(|_| required_error())?;
        let price = self.price.trim();
        if price.parse::<f64>().map_or(true, |p| !p.is_finite()) {
            return Err(ApiError::Validation(format!(
                "Harga tidak valid: {}",
                self.price
            )));
        }
        Ok(ItemInput {
            code: self.code.clone(),
            name: self.name.clone(),
            price: parse_amount(price),
        })
    }
}
