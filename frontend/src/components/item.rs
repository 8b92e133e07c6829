//! 商品主数据页面

use leptos::prelude::*;
use leptos::task::spawn_local;
use rekap_shared::Item;
use rekap_shared::amount::format_rupiah;
use rekap_shared::forms::{ItemForm, REQUIRED_FIELDS_MESSAGE};

use crate::components::form_dialog::FormDialog;
use crate::components::icons::{Cube, Pencil, Plus, Trash2};
use crate::config::use_config;
use crate::web::dialog::{alert, confirm};

#[component]
pub fn ItemPage() -> impl IntoView {
    let config = use_config();

    let (items, set_items) = signal(Vec::<Item>::new());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<u64>::None);
    let form = RwSignal::new(ItemForm::default());

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match config.client().list_items().await {
                Ok(list) => set_items.set(list),
                Err(e) => log::error!("[Item] failed to load items: {}", e),
            }
            set_loading.set(false);
        });
    };
    load();

    let open_add = move |_| {
        editing.set(None);
        form.set(ItemForm::default());
        open.set(true);
    };

    let open_edit = move |item: &Item| {
        editing.set(Some(item.id));
        form.set(ItemForm::from_item(item));
        open.set(true);
    };

    let on_save = move |_: ()| {
        let input = match form.with_untracked(|f| f.to_input()) {
            Ok(input) => input,
            Err(e) => {
                alert(&e.user_message(REQUIRED_FIELDS_MESSAGE));
                return;
            }
        };
        let id = editing.get_untracked();

        set_saving.set(true);
        spawn_local(async move {
            let api = config.client();
            let result = match id {
                Some(id) => api.update_item(id, &input).await,
                None => api.create_item(&input).await,
            };
            match result {
                Ok(()) => {
                    open.set(false);
                    load();
                }
                Err(e) => {
                    log::error!("[Item] save failed: {}", e);
                    alert(&e.user_message("Gagal menyimpan data."));
                }
            }
            set_saving.set(false);
        });
    };

    let on_delete = move |id: u64| {
        if !confirm("Yakin ingin menghapus item ini?") {
            return;
        }
        spawn_local(async move {
            match config.client().delete_item(id).await {
                Ok(()) => load(),
                Err(e) => {
                    log::error!("[Item] delete {} failed: {}", id, e);
                    alert("Gagal menghapus data.");
                }
            }
        });
    };

    let title = Signal::derive(move || {
        if editing.get().is_some() {
            "Edit Barang".to_string()
        } else {
            "Tambah Barang Baru".to_string()
        }
    });

    view! {
        <div class="max-w-5xl mx-auto p-4 md:p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold flex items-center gap-2">
                    <Cube attr:class="h-7 w-7 text-primary" /> "Data Barang"
                </h2>
                <button class="btn btn-primary gap-2" on:click=open_add>
                    <Plus attr:class="h-4 w-4" /> "Tambah Barang"
                </button>
            </div>

            <div class="card bg-base-100 shadow overflow-x-auto">
                <table class="table table-zebra">
                    <thead class="bg-primary text-primary-content">
                        <tr>
                            <th class="w-12">"No"</th>
                            <th>"Kode Barang"</th>
                            <th>"Nama Barang"</th>
                            <th>"Harga Satuan"</th>
                            <th class="text-center">"Aksi"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <Show when=move || loading.get()>
                            <tr>
                                <td colspan="5" class="text-center">
                                    <span class="loading loading-spinner loading-md mt-2"></span>
                                </td>
                            </tr>
                        </Show>
                        <Show when=move || !loading.get() && items.with(|i| i.is_empty())>
                            <tr>
                                <td colspan="5" class="text-center">"Tidak ada data barang."</td>
                            </tr>
                        </Show>
                        {move || {
                            items
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(idx, item)| {
                                    let id = item.id;
                                    let code = item.code.clone();
                                    let name = item.name.clone();
                                    // 价格缺失按 0 显示
                                    let price = format_rupiah(item.price.unwrap_or(0.0));
                                    view! {
                                        <tr>
                                            <td>{idx + 1}</td>
                                            <td class="font-mono">{code}</td>
                                            <td>{name}</td>
                                            <td>{price}</td>
                                            <td class="text-center">
                                                <button class="btn btn-ghost btn-sm btn-square text-primary" on:click=move |_| open_edit(&item)>
                                                    <Pencil attr:class="h-4 w-4" />
                                                </button>
                                                <button class="btn btn-ghost btn-sm btn-square text-error" on:click=move |_| on_delete(id)>
                                                    <Trash2 attr:class="h-4 w-4" />
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            <FormDialog open=open title=title saving=saving on_save=on_save>
                <label class="form-control w-full">
                    <span class="label-text mb-1">"Kode Barang (misal: ITEM-A)"</span>
                    <input
                        type="text"
                        class="input input-bordered w-full"
                        prop:value=move || form.with(|f| f.code.clone())
                        on:input=move |ev| form.update(|f| f.code = event_target_value(&ev))
                    />
                </label>
                <label class="form-control w-full">
                    <span class="label-text mb-1">"Nama Barang"</span>
                    <input
                        type="text"
                        class="input input-bordered w-full"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </label>
                <label class="form-control w-full">
                    <span class="label-text mb-1">"Harga Satuan"</span>
                    <label class="input input-bordered flex items-center gap-2">
                        "Rp"
                        <input
                            type="number"
                            class="grow"
                            prop:value=move || form.with(|f| f.price.clone())
                            on:input=move |ev| form.update(|f| f.price = event_target_value(&ev))
                        />
                    </label>
                </label>
            </FormDialog>
        </div>
    }
}
