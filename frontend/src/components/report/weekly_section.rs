//! 单个 (星期, 周) 分桶的录入表格

use leptos::prelude::*;
use rekap_shared::amount::format_rupiah;
use rekap_shared::{MasterData, ReportForm, RowField, Week, Weekday};

use crate::components::icons::{Plus, Trash2};

#[component]
pub fn WeeklySection(
    day: Weekday,
    week: Week,
    form: RwSignal<ReportForm>,
    master: RwSignal<MasterData>,
) -> impl IntoView {
    let (expanded, set_expanded) = signal(week == Week::FIRST);

    let totals = move || form.with(|f| f.grid.totals(day, week));
    let read_only = move || form.with(|f| !f.is_editable());
    let row_count = move || form.with(|f| f.grid.bucket_len(day, week));

    // 读取某个单元格的当前值
    let cell = move |index: usize, field: RowField| {
        form.with(|f| {
            f.grid
                .row(day, week, index)
                .map(|r| r.get(field).to_string())
                .unwrap_or_default()
        })
    };

    let update = move |index: usize, field: RowField, value: String| {
        master.with_untracked(|m| {
            form.update(|f| f.update_cell(day, week, index, field, value, m));
        });
    };

    view! {
        <div class="collapse collapse-arrow bg-base-100 border border-base-300">
            <input
                type="checkbox"
                prop:checked=move || expanded.get()
                on:change=move |_| set_expanded.update(|v| *v = !*v)
            />
            <div class="collapse-title flex items-center gap-3">
                <span class="font-bold w-24">{week.to_string()}</span>
                <span class="badge badge-primary badge-outline">
                    {move || format!("Order: {}", totals().qty_order)}
                </span>
                <span class=move || {
                    if totals().has_surplus() { "badge badge-warning badge-outline" } else { "badge badge-outline" }
                }>
                    {move || format!("Sisa: {}", totals().qty_remaining)}
                </span>
            </div>
            <div class="collapse-content overflow-x-auto">
                <table class="table table-sm">
                    <thead>
                        <tr class="bg-base-200">
                            <th class="w-1/4">"Outlet"</th>
                            <th class="w-1/4">"Item"</th>
                            <th>"Qty Order"</th>
                            <th>"Qty Sold"</th>
                            <th>"Sisa"</th>
                            <th>"Deposit"</th>
                            <th class="text-center">"Hapus"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || 0..row_count()
                            key=|index| *index
                            children=move |index| {
                                let remaining = move || {
                                    form.with(|f| f.grid.row(day, week, index).map(|r| r.remaining()).unwrap_or(0))
                                };
                                view! {
                                    <tr class="hover">
                                        <td>
                                            <select
                                                class="select select-bordered select-sm w-full"
                                                disabled=read_only
                                                prop:value=move || cell(index, RowField::OutletId)
                                                on:change=move |ev| update(index, RowField::OutletId, event_target_value(&ev))
                                            >
                                                <option value="">"Pilih Outlet"</option>
                                                {move || master.with(|m| {
                                                    m.outlets
                                                        .iter()
                                                        .map(|o| {
                                                            let code = o.code.clone();
                                                            let selected = cell(index, RowField::OutletId) == code;
                                                            view! { <option value=code selected=selected>{o.name.clone()}</option> }
                                                        })
                                                        .collect_view()
                                                })}
                                            </select>
                                        </td>
                                        <td>
                                            <select
                                                class="select select-bordered select-sm w-full"
                                                disabled=read_only
                                                prop:value=move || cell(index, RowField::ItemId)
                                                on:change=move |ev| update(index, RowField::ItemId, event_target_value(&ev))
                                            >
                                                <option value="">"Pilih Item"</option>
                                                {move || master.with(|m| {
                                                    m.items
                                                        .iter()
                                                        .map(|i| {
                                                            let code = i.code.clone();
                                                            let selected = cell(index, RowField::ItemId) == code;
                                                            view! { <option value=code selected=selected>{i.name.clone()}</option> }
                                                        })
                                                        .collect_view()
                                                })}
                                            </select>
                                        </td>
                                        <td>
                                            <input
                                                type="number"
                                                step="1"
                                                class="input input-bordered input-sm w-24"
                                                disabled=read_only
                                                prop:value=move || cell(index, RowField::QtyOrder)
                                                on:input=move |ev| update(index, RowField::QtyOrder, event_target_value(&ev))
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="number"
                                                step="1"
                                                class="input input-bordered input-sm w-24"
                                                disabled=read_only
                                                prop:value=move || cell(index, RowField::QtySold)
                                                on:input=move |ev| update(index, RowField::QtySold, event_target_value(&ev))
                                            />
                                        </td>
                                        <td class=move || if remaining() != 0 { "font-bold text-error" } else { "opacity-60" }>
                                            {remaining}
                                        </td>
                                        <td>
                                            <input
                                                type="number"
                                                class="input input-bordered input-sm w-32"
                                                disabled=read_only
                                                prop:value=move || cell(index, RowField::Deposit)
                                                on:input=move |ev| update(index, RowField::Deposit, event_target_value(&ev))
                                            />
                                        </td>
                                        <td class="text-center">
                                            <button
                                                class="btn btn-ghost btn-sm btn-square text-error"
                                                disabled=read_only
                                                on:click=move |_| form.update(|f| f.delete_row(day, week, index))
                                            >
                                                <Trash2 attr:class="h-4 w-4" />
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <div class="divider my-2"></div>

                <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                    <div class="flex flex-wrap gap-2 text-sm">
                        <span class="badge badge-ghost p-3">{move || format!("Total Order: {}", totals().qty_order)}</span>
                        <span class="badge badge-ghost p-3">{move || format!("Total Sold: {}", totals().qty_sold)}</span>
                        <span class=move || if totals().has_surplus() { "badge badge-warning p-3" } else { "badge badge-ghost p-3" }>
                            {move || format!("Total Sisa: {}", totals().qty_remaining)}
                        </span>
                        <span class="badge badge-ghost p-3">
                            {move || format!("Total Deposit: {}", format_rupiah(totals().deposit))}
                        </span>
                    </div>
                    <button
                        class="btn btn-outline btn-sm gap-2"
                        disabled=read_only
                        on:click=move |_| form.update(|f| f.add_row(day, week))
                    >
                        <Plus attr:class="h-4 w-4" /> "Tambah Baris"
                    </button>
                </div>
            </div>
        </div>
    }
}
