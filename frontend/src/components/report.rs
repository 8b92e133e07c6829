//! 报表网格视图
//!
//! 新建页面与编辑页面共用：按星期切换标签，每天显示 4 个周区块。
//! 所有修改都经过 `ReportForm`，锁定时修改自动失效。

mod weekly_section;

use leptos::prelude::*;
use rekap_shared::amount::format_rupiah;
use rekap_shared::{MasterData, ReportForm, Week, Weekday};

use weekly_section::WeeklySection;

#[component]
pub fn ReportBoard(
    form: RwSignal<ReportForm>,
    master: RwSignal<MasterData>,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView {
    let (tab, set_tab) = signal(Weekday::Senin);

    let day_totals = move || form.with(|f| f.grid.day_totals(tab.get()));
    let month_totals = move || form.with(|f| f.grid.grand_totals());

    view! {
        <div class="card bg-base-100 shadow">
            <div role="tablist" class="tabs tabs-bordered overflow-x-auto">
                {Weekday::ALL
                    .into_iter()
                    .map(|day| {
                        view! {
                            <a
                                role="tab"
                                class=move || if tab.get() == day { "tab tab-active font-bold" } else { "tab font-bold" }
                                on:click=move |_| set_tab.set(day)
                            >
                                {day.name()}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="p-4 bg-base-200/40 min-h-[500px] space-y-4">
                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="text-center p-8">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }
                >
                    {move || {
                        let day = tab.get();
                        Week::ALL
                            .into_iter()
                            .map(|week| view! { <WeeklySection day=day week=week form=form master=master /> })
                            .collect_view()
                    }}
                    <div class="stats shadow w-full bg-base-100">
                        <div class="stat">
                            <div class="stat-title">{move || format!("Total {}", tab.get())}</div>
                            <div class="stat-value text-lg">{move || day_totals().qty_order}</div>
                            <div class="stat-desc">"Order"</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Sold"</div>
                            <div class="stat-value text-lg">{move || day_totals().qty_sold}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Sisa"</div>
                            <div class=move || if day_totals().has_surplus() { "stat-value text-lg text-warning" } else { "stat-value text-lg" }>
                                {move || day_totals().qty_remaining}
                            </div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Deposit"</div>
                            <div class="stat-value text-lg">{move || format_rupiah(day_totals().deposit)}</div>
                        </div>
                    </div>
                    <div class="stats shadow w-full bg-base-100">
                        <div class="stat">
                            <div class="stat-title">"Total Bulan Ini"</div>
                            <div class="stat-value text-lg">{move || month_totals().qty_order}</div>
                            <div class="stat-desc">"Order"</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Sold"</div>
                            <div class="stat-value text-lg">{move || month_totals().qty_sold}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Sisa"</div>
                            <div class="stat-value text-lg">{move || month_totals().qty_remaining}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Deposit"</div>
                            <div class="stat-value text-lg text-primary">{move || format_rupiah(month_totals().deposit)}</div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
