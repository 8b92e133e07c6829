//! 新建周报页面
//!
//! 切换月份 / 年份时重新获取期间数据：上一个请求被中止，
//! 迟到的响应由序号栅栏丢弃。期间已有数据时整页锁定。

use leptos::prelude::*;
use leptos::task::spawn_local;
use rekap_shared::sequence::LatestOnly;
use rekap_shared::{FormMode, MONTHS, MasterData, Period, PeriodLock, ReportForm};

use crate::components::icons::{Lock, Save};
use crate::components::report::ReportBoard;
use crate::config::use_config;
use crate::web::dialog::alert;
use crate::web::{AbortSlot, FetchHttpClient};

#[component]
pub fn LaporanPage() -> impl IntoView {
    let config = use_config();

    let period = RwSignal::new(Period::current());
    let form = RwSignal::new(ReportForm::new(FormMode::Create));
    let master = RwSignal::new(MasterData::default());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (fetch_failed, set_fetch_failed) = signal(false);

    let fetches = StoredValue::new(LatestOnly::new());
    let abort = StoredValue::new_local(AbortSlot::default());

    // 1. 主数据只在进入页面时获取一次
    spawn_local(async move {
        match config.client().load_master_data().await {
            Ok(data) => master.set(data),
            Err(e) => log::error!("[Laporan] failed to load master data: {}", e),
        }
    });

    // 2. 期间变化时重新获取报表
    Effect::new(move |_| {
        let target = period.get();
        form.update(|f| f.reset());
        set_loading.set(true);
        set_fetch_failed.set(false);

        let ticket = fetches.with_value(|s| s.begin());
        let http = abort
            .try_update_value(|slot| slot.renew())
            .flatten()
            .map(FetchHttpClient::with_signal)
            .unwrap_or_default();
        let api = config.client_with(http);

        spawn_local(async move {
            let result = api.fetch_report(target).await;
            if !ticket.is_current() {
                log::debug!("[Laporan] dropping stale response for {}", target);
                return;
            }
            match result {
                Ok(records) => {
                    log::info!("[Laporan] {} has {} saved rows", target, records.len());
                    form.update(|f| f.load(&records));
                }
                Err(e) if e.is_cancelled() => return,
                // 锁保持 Unknown，在成功获取之前不能提交
                Err(e) => {
                    log::error!("[Laporan] failed to fetch report for {}: {}", target, e);
                    set_fetch_failed.set(true);
                }
            }
            set_loading.set(false);
        });
    });

    on_cleanup(move || {
        fetches.with_value(|s| s.invalidate());
        abort.update_value(|slot| slot.abort());
    });

    let locked = move || form.with(|f| f.lock == PeriodLock::Locked);
    let editable = move || form.with(|f| f.is_editable());

    let on_submit = move |_| {
        let target = period.get_untracked();
        let rows = match form.with_untracked(|f| f.prepare_submit(target)) {
            Ok(rows) => rows,
            Err(blocked) => {
                alert(&blocked.to_string());
                return;
            }
        };

        set_saving.set(true);
        spawn_local(async move {
            match config.client().submit_report(&rows).await {
                Ok(()) => {
                    alert("Berhasil disimpan!");
                    form.update(|f| f.mark_submitted());
                }
                Err(e) => {
                    log::error!("[Laporan] submit failed: {}", e);
                    alert(&format!("Error: {}", e.user_message("Gagal simpan")));
                }
            }
            set_saving.set(false);
        });
    };

    let button_label = move || {
        if loading.get() {
            "Memuat..."
        } else if locked() {
            "Laporan Sudah Diisi"
        } else if fetch_failed.get() {
            "Data Belum Dimuat"
        } else if saving.get() {
            "Menyimpan..."
        } else {
            "Simpan Laporan"
        }
    };

    view! {
        <div class="max-w-6xl mx-auto p-4 md:p-6 space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"Input Laporan Penjualan"</h2>
                <button
                    class=move || if editable() { "btn btn-primary gap-2" } else { "btn btn-disabled gap-2" }
                    disabled=move || loading.get() || saving.get() || !editable()
                    on:click=on_submit
                >
                    {move || if saving.get() {
                        view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                    } else if locked() {
                        view! { <Lock attr:class="h-5 w-5 text-success" /> }.into_any()
                    } else {
                        view! { <Save attr:class="h-5 w-5" /> }.into_any()
                    }}
                    {button_label}
                </button>
            </div>

            <div class="card bg-base-100 shadow p-4">
                <div class="flex flex-col md:flex-row md:items-center gap-4">
                    <select
                        class="select select-bordered select-sm w-full md:w-48"
                        prop:value=move || period.get().month.to_string()
                        on:change=move |ev| {
                            if let Ok(month) = event_target_value(&ev).parse::<u32>() {
                                if let Some(p) = Period::new(period.get_untracked().year, month) {
                                    period.set(p);
                                }
                            }
                        }
                    >
                        {MONTHS
                            .iter()
                            .enumerate()
                            .map(|(i, name)| {
                                let month = i as u32 + 1;
                                view! {
                                    <option value=month.to_string() selected=move || period.get().month == month>
                                        {*name}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <label class="input input-bordered input-sm flex items-center gap-2 w-full md:w-40">
                        "Tahun"
                        <input
                            type="number"
                            class="grow"
                            prop:value=move || period.get().year.to_string()
                            on:change=move |ev| {
                                if let Ok(year) = event_target_value(&ev).parse::<i32>() {
                                    if let Some(p) = Period::new(year, period.get_untracked().month) {
                                        period.set(p);
                                    }
                                }
                            }
                        />
                    </label>
                    <Show when=locked>
                        <span class="text-error text-sm font-bold">
                            "* Data untuk periode ini sudah terkunci."
                        </span>
                    </Show>
                </div>
            </div>

            <Show when=move || fetch_failed.get()>
                <div role="alert" class="alert alert-error">
                    <span>"Gagal memuat data laporan. Pilih ulang periode untuk mencoba lagi."</span>
                </div>
            </Show>

            <ReportBoard form=form master=master loading=loading />
        </div>
    }
}
