//! Razorpay Checkout 控件适配
//!
//! 按需加载 `checkout.js`，把订单交给 `window.Razorpay`，
//! 再通过 oneshot 通道把 `handler` / `modal.ondismiss` 回调转换为 Future。

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use paydesk_shared::checkout::{PaymentWidget, Prefill, WidgetError};
use paydesk_shared::config::ClientConfig;
use paydesk_shared::{GatewayCallback, GatewayOrder};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlScriptElement;

use crate::serde_helper;

const SCRIPT_ID: &str = "razorpay-checkout-js";

#[wasm_bindgen]
extern "C" {
    type Razorpay;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<Razorpay, JsValue>;

    #[wasm_bindgen(method)]
    fn open(this: &Razorpay);
}

#[derive(Serialize)]
struct Theme<'a> {
    color: &'a str,
}

/// 传给 `new Razorpay(options)` 的静态字段；回调函数另行挂载
#[derive(Serialize)]
struct CheckoutOptions<'a> {
    key: &'a str,
    amount: f64,
    currency: &'a str,
    name: &'a str,
    description: &'a str,
    order_id: &'a str,
    prefill: &'a Prefill,
    theme: Theme<'a>,
}

#[derive(Deserialize)]
struct HandlerResponse {
    #[serde(default)]
    razorpay_order_id: String,
    #[serde(default)]
    razorpay_payment_id: String,
    #[serde(default)]
    razorpay_signature: String,
}

impl From<HandlerResponse> for GatewayCallback {
    fn from(r: HandlerResponse) -> Self {
        GatewayCallback {
            order_id: r.razorpay_order_id,
            payment_id: r.razorpay_payment_id,
            signature: r.razorpay_signature,
        }
    }
}

fn unavailable(value: impl std::fmt::Debug) -> WidgetError {
    WidgetError::Unavailable(format!("{:?}", value))
}

/// 一次性结果通道的发送端，可被多个回调共享，只有第一个生效
type SharedSender<T> = Rc<RefCell<Option<oneshot::Sender<T>>>>;

fn settle<T>(tx: &SharedSender<T>, value: T) {
    if let Some(tx) = tx.borrow_mut().take() {
        let _ = tx.send(value);
    }
}

/// 确保 `checkout.js` 已加载；重复调用复用同一个 `<script>` 元素
pub async fn ensure_script(src: &str) -> Result<(), WidgetError> {
    let window = web_sys::window().ok_or_else(|| unavailable("window"))?;
    if js_sys::Reflect::has(&window, &JsValue::from_str("Razorpay")).unwrap_or(false) {
        return Ok(());
    }
    let document = window.document().ok_or_else(|| unavailable("document"))?;

    let script: HtmlScriptElement = match document.get_element_by_id(SCRIPT_ID) {
        Some(existing) => existing.dyn_into().map_err(unavailable)?,
        None => {
            let script: HtmlScriptElement = document
                .create_element("script")
                .map_err(unavailable)?
                .dyn_into()
                .map_err(unavailable)?;
            script.set_id(SCRIPT_ID);
            script.set_src(src);
            script.set_async(true);
            let body = document.body().ok_or_else(|| unavailable("body"))?;
            body.append_child(&script).map_err(unavailable)?;
            script
        }
    };

    let (tx, rx) = oneshot::channel::<Result<(), WidgetError>>();
    let tx: SharedSender<_> = Rc::new(RefCell::new(Some(tx)));

    let on_load = {
        let tx = tx.clone();
        Closure::<dyn FnMut()>::new(move || settle(&tx, Ok(())))
    };
    let on_error = {
        let tx = tx.clone();
        let src = src.to_string();
        Closure::<dyn FnMut()>::new(move || {
            settle(
                &tx,
                Err(WidgetError::Unavailable(format!("failed to load {}", src))),
            )
        })
    };

    script
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        .map_err(unavailable)?;
    script
        .add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())
        .map_err(unavailable)?;

    let result = rx.await.unwrap_or_else(|_| Err(unavailable("script loader dropped")));

    let _ = script.remove_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
    let _ =
        script.remove_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());

    // 失败的元素移除，下次重新插入
    if result.is_err() {
        script.remove();
    }
    result
}

/// 浏览器里的 Razorpay 支付控件
#[derive(Debug, Clone)]
pub struct RazorpayWidget {
    script_src: String,
    theme_color: String,
}

impl RazorpayWidget {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            script_src: config.razorpay_script_src.clone(),
            theme_color: config.theme_color.clone(),
        }
    }

    pub fn script_src(&self) -> &str {
        &self.script_src
    }
}

#[async_trait::async_trait(?Send)]
impl PaymentWidget for RazorpayWidget {
    async fn collect(
        &self,
        order: &GatewayOrder,
        prefill: &Prefill,
    ) -> Result<GatewayCallback, WidgetError> {
        ensure_script(&self.script_src).await?;

        let options = serde_helper::to_value(&CheckoutOptions {
            key: &order.key,
            amount: order.amount,
            currency: &order.currency,
            name: &order.name,
            description: &order.description,
            order_id: &order.order_id,
            prefill,
            theme: Theme {
                color: &self.theme_color,
            },
        })
        .map_err(|e| WidgetError::Unavailable(e.to_string()))?;

        let (tx, rx) = oneshot::channel::<Result<GatewayCallback, WidgetError>>();
        let tx: SharedSender<_> = Rc::new(RefCell::new(Some(tx)));

        let handler = {
            let tx = tx.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
                let result = serde_helper::from_value::<HandlerResponse>(response)
                    .map(GatewayCallback::from)
                    .map_err(|e| WidgetError::Unavailable(e.to_string()));
                settle(&tx, result);
            })
        };
        let on_dismiss = {
            let tx = tx.clone();
            Closure::<dyn FnMut()>::new(move || settle(&tx, Err(WidgetError::Dismissed)))
        };

        let modal = js_sys::Object::new();
        serde_helper::set_property(&modal, "ondismiss", on_dismiss.as_ref())
            .and_then(|_| serde_helper::set_property(&options, "handler", handler.as_ref()))
            .and_then(|_| serde_helper::set_property(&options, "modal", &modal))
            .map_err(|e| WidgetError::Unavailable(e.to_string()))?;

        let checkout = Razorpay::new(&options).map_err(unavailable)?;
        checkout.open();

        // handler 与 ondismiss 每次只触发其一；结果送达后两个闭包连同发送端一起释放
        let result = rx.await.unwrap_or(Err(WidgetError::Dismissed));
        drop(handler);
        drop(on_dismiss);
        result
    }
}
